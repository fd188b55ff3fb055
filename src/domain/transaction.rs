use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::obligation::Obligation;

/// One realized ledger effect. The transaction history is append-only: the
/// core appends records and never mutates or deletes existing entries.
///
/// Two record shapes share this struct, matching the stored data: processing
/// records carry `transactionType`, `accountId`, and `executedAt`; deletion
/// records carry `type`, `linkedAccountId`, and `date`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    pub id: String,
    #[serde(
        rename = "transactionType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_type: Option<TransactionType>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "accountId", default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(
        rename = "linkedAccountId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub linked_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "executedAt", default, skip_serializing_if = "Option::is_none")]
    pub executed_at: Option<DateTime<Utc>>,
}

impl TransactionRecord {
    /// Record of a due obligation applied by the processing pass.
    pub fn executed(
        obligation: &Obligation,
        transaction_type: TransactionType,
        executed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            transaction_type: Some(transaction_type),
            kind: None,
            amount: obligation.amount,
            description: obligation.description.clone(),
            account_id: obligation.account_id.clone(),
            linked_account_id: None,
            date: None,
            executed_at: Some(executed_at),
        }
    }

    /// Record appended when a debt or income stream is deleted from its
    /// collection, preserving what was removed.
    pub fn deletion(
        obligation: &Obligation,
        transaction_type: TransactionType,
        deleted_at: DateTime<Utc>,
    ) -> Self {
        let kind = match transaction_type {
            TransactionType::Debt => "debt-deletion",
            TransactionType::Income => "income-deletion",
        };
        Self {
            id: Uuid::new_v4().to_string(),
            transaction_type: None,
            kind: Some(kind.to_owned()),
            amount: obligation.amount,
            description: obligation.description.clone(),
            account_id: None,
            linked_account_id: obligation.account_id.clone(),
            date: Some(deleted_at),
            executed_at: None,
        }
    }
}

/// Which ledger a record settled against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Debt,
    Income,
}
