use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    core::utils::{app_data_dir, ensure_dir},
    domain::{account::Account, obligation::Obligation, task::Task, transaction::TransactionRecord},
};

use super::{Collection, FinanceStore, Result};

/// File-backed store: one pretty-printed JSON array per collection under a
/// single data directory. Writes stage to a temporary file and rename into
/// place so a crash mid-write never leaves a half-written collection.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Opens (creating if needed) a store rooted at the default data
    /// directory.
    pub fn open_default() -> Result<Self> {
        Self::open(app_data_dir())
    }

    /// Opens a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    /// File path backing the given collection.
    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        self.root.join(format!("{}.json", collection.key()))
    }

    fn read<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        let path = self.collection_path(collection);
        if !path.exists() {
            debug!(%collection, "no data on disk, returning empty collection");
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn write<T: Serialize>(&self, collection: Collection, items: &[T]) -> Result<()> {
        let path = self.collection_path(collection);
        let json = serde_json::to_string_pretty(items)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

impl FinanceStore for JsonStore {
    fn load_accounts(&self) -> Result<Vec<Account>> {
        self.read(Collection::Accounts)
    }

    fn save_accounts(&self, accounts: &[Account]) -> Result<()> {
        self.write(Collection::Accounts, accounts)
    }

    fn load_debts(&self) -> Result<Vec<Obligation>> {
        self.read(Collection::Debts)
    }

    fn save_debts(&self, debts: &[Obligation]) -> Result<()> {
        self.write(Collection::Debts, debts)
    }

    fn load_income(&self) -> Result<Vec<Obligation>> {
        self.read(Collection::Income)
    }

    fn save_income(&self, income: &[Obligation]) -> Result<()> {
        self.write(Collection::Income, income)
    }

    fn load_transaction_history(&self) -> Result<Vec<TransactionRecord>> {
        self.read(Collection::TransactionHistory)
    }

    fn save_transaction_history(&self, history: &[TransactionRecord]) -> Result<()> {
        self.write(Collection::TransactionHistory, history)
    }

    fn load_tasks(&self) -> Result<Vec<Task>> {
        self.read(Collection::Tasks)
    }

    fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        self.write(Collection::Tasks, tasks)
    }

    fn clear_all(&self) -> Result<()> {
        for collection in Collection::ALL {
            let path = self.collection_path(collection);
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}
