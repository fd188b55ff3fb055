use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A balance-holding account that debts draw from and income streams feed.
/// Accounts are created by the host's account form; the processing pass only
/// mutates `balance`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub balance: f64,
}

impl Account {
    /// Creates a new account with a generated id and an opening balance.
    pub fn new(name: impl Into<String>, balance: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            balance,
        }
    }
}
