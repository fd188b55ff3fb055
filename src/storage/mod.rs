pub mod json_backend;
pub mod memory;

use std::fmt;

use crate::{
    domain::{account::Account, obligation::Obligation, task::Task, transaction::TransactionRecord},
    errors::FinanceError,
};

pub type Result<T> = std::result::Result<T, FinanceError>;

/// Names the persisted collections; used for storage keys and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Accounts,
    Debts,
    Income,
    TransactionHistory,
    Tasks,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Accounts,
        Collection::Debts,
        Collection::Income,
        Collection::TransactionHistory,
        Collection::Tasks,
    ];

    /// Storage key / file stem for the collection.
    pub fn key(self) -> &'static str {
        match self {
            Collection::Accounts => "accounts",
            Collection::Debts => "debts",
            Collection::Income => "income",
            Collection::TransactionHistory => "transaction_history",
            Collection::Tasks => "tasks",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Abstraction over persistence backends holding the tracker's collections.
///
/// The host shell owns the concrete storage mechanism; the core only needs
/// ordered sequences that load back exactly as saved. A missing collection
/// loads as an empty sequence; a malformed one is an error for the caller to
/// degrade as it sees fit.
pub trait FinanceStore: Send + Sync {
    fn load_accounts(&self) -> Result<Vec<Account>>;
    fn save_accounts(&self, accounts: &[Account]) -> Result<()>;
    fn load_debts(&self) -> Result<Vec<Obligation>>;
    fn save_debts(&self, debts: &[Obligation]) -> Result<()>;
    fn load_income(&self) -> Result<Vec<Obligation>>;
    fn save_income(&self, income: &[Obligation]) -> Result<()>;
    fn load_transaction_history(&self) -> Result<Vec<TransactionRecord>>;
    fn save_transaction_history(&self, history: &[TransactionRecord]) -> Result<()>;
    fn load_tasks(&self) -> Result<Vec<Task>>;
    fn save_tasks(&self, tasks: &[Task]) -> Result<()>;

    /// Removes every persisted collection.
    fn clear_all(&self) -> Result<()>;

    /// Appends one record to the transaction history as a
    /// read-modify-write cycle. Callers racing on history must be
    /// serialized upstream; the processor's single-flight guard does this
    /// for processing passes.
    fn add_transaction_record(&self, record: &TransactionRecord) -> Result<()> {
        let mut history = self.load_transaction_history()?;
        history.push(record.clone());
        self.save_transaction_history(&history)
    }
}

pub use json_backend::JsonStore;
pub use memory::MemoryStore;
