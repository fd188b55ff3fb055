pub mod account;
pub mod obligation;
pub mod task;
pub mod transaction;

pub use account::Account;
pub use obligation::{Obligation, ObligationKind, RecurringFrequency};
pub use task::{Task, TaskAttachment, TaskPriority};
pub use transaction::{TransactionRecord, TransactionType};
