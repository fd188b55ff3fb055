pub mod clock;
pub mod processor;
pub mod recurrence;
pub mod services;
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use processor::{
    process_due, DueTransactionProcessor, LedgerSnapshot, PassOutcome, ProcessReport,
    ProcessWarning, RunOutcome,
};
