use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::{
    account::Account, obligation::Obligation, task::Task, transaction::TransactionRecord,
};

use super::{FinanceStore, Result};

/// Volatile store backed by process memory. Stands in for the device's
/// key-value storage in tests and host-side previews.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    accounts: Vec<Account>,
    debts: Vec<Obligation>,
    income: Vec<Obligation>,
    history: Vec<TransactionRecord>,
    tasks: Vec<Task>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FinanceStore for MemoryStore {
    fn load_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.state().accounts.clone())
    }

    fn save_accounts(&self, accounts: &[Account]) -> Result<()> {
        self.state().accounts = accounts.to_vec();
        Ok(())
    }

    fn load_debts(&self) -> Result<Vec<Obligation>> {
        Ok(self.state().debts.clone())
    }

    fn save_debts(&self, debts: &[Obligation]) -> Result<()> {
        self.state().debts = debts.to_vec();
        Ok(())
    }

    fn load_income(&self) -> Result<Vec<Obligation>> {
        Ok(self.state().income.clone())
    }

    fn save_income(&self, income: &[Obligation]) -> Result<()> {
        self.state().income = income.to_vec();
        Ok(())
    }

    fn load_transaction_history(&self) -> Result<Vec<TransactionRecord>> {
        Ok(self.state().history.clone())
    }

    fn save_transaction_history(&self, history: &[TransactionRecord]) -> Result<()> {
        self.state().history = history.to_vec();
        Ok(())
    }

    fn load_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.state().tasks.clone())
    }

    fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        self.state().tasks = tasks.to_vec();
        Ok(())
    }

    fn clear_all(&self) -> Result<()> {
        *self.state() = State::default();
        Ok(())
    }
}
