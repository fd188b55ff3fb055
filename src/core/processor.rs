use std::sync::{Arc, Mutex, TryLockError};

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    core::{
        clock::{Clock, SystemClock},
        recurrence,
    },
    domain::{
        account::Account,
        obligation::{Obligation, ObligationKind},
        transaction::{TransactionRecord, TransactionType},
    },
    storage::{Collection, FinanceStore},
};

/// Everything one processing pass reads.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    pub accounts: Vec<Account>,
    pub debts: Vec<Obligation>,
    pub incomes: Vec<Obligation>,
}

/// Everything one processing pass produces: the updated collections, the
/// history records to append, and any non-fatal diagnostics.
#[derive(Debug, Clone, Default)]
pub struct PassOutcome {
    pub accounts: Vec<Account>,
    pub debts: Vec<Obligation>,
    pub incomes: Vec<Obligation>,
    pub new_records: Vec<TransactionRecord>,
    pub warnings: Vec<ProcessWarning>,
}

/// Non-fatal conditions surfaced by a processing pass. None of these abort
/// the pass; each degrades to "treat as absent / not due".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessWarning {
    #[error("loading {collection} failed, continuing with an empty list: {message}")]
    LoadFailed {
        collection: Collection,
        message: String,
    },
    #[error("saving {collection} failed, updates dropped: {message}")]
    SaveFailed {
        collection: Collection,
        message: String,
    },
    #[error("appending history record `{record_id}` failed: {message}")]
    AppendFailed { record_id: String, message: String },
    #[error("obligation `{obligation_id}` references unknown account `{account_id}`")]
    UnknownAccount {
        obligation_id: String,
        account_id: String,
    },
}

/// Applies every due one-time and recurring obligation in `snapshot` to its
/// account, returning the updated collections and the history records that
/// realize the applied effects.
///
/// `now` orders one-time due dates; `today` drives calendar matching for
/// recurring entries. Debts settle before incomes, and within each ledger the
/// one-time pass runs before the recurring pass, so history records land in
/// that order. A one-time entry whose due instant has arrived is consumed
/// even when its account cannot be resolved (the effect is dropped and a
/// warning recorded); recurring entries are always retained and fire on every
/// pass for which the calendar still matches. Manual and unrecognized entry
/// types are never touched.
pub fn process_due(snapshot: LedgerSnapshot, now: DateTime<Utc>, today: NaiveDate) -> PassOutcome {
    let LedgerSnapshot {
        mut accounts,
        debts,
        incomes,
    } = snapshot;
    let mut new_records = Vec::new();
    let mut warnings = Vec::new();

    let debts = settle_ledger(
        &mut accounts,
        debts,
        TransactionType::Debt,
        now,
        today,
        &mut new_records,
        &mut warnings,
    );
    let incomes = settle_ledger(
        &mut accounts,
        incomes,
        TransactionType::Income,
        now,
        today,
        &mut new_records,
        &mut warnings,
    );

    PassOutcome {
        accounts,
        debts,
        incomes,
        new_records,
        warnings,
    }
}

fn settle_ledger(
    accounts: &mut [Account],
    entries: Vec<Obligation>,
    transaction_type: TransactionType,
    now: DateTime<Utc>,
    today: NaiveDate,
    new_records: &mut Vec<TransactionRecord>,
    warnings: &mut Vec<ProcessWarning>,
) -> Vec<Obligation> {
    // One-time pass: consume entries whose due instant has arrived, keeping
    // everything else in its original relative order.
    let mut retained = Vec::with_capacity(entries.len());
    for entry in entries {
        let due = entry.kind() == ObligationKind::OneTime
            && entry.due_instant().is_some_and(|due| due <= now);
        if due {
            apply_effect(accounts, &entry, transaction_type, now, new_records, warnings);
        } else {
            retained.push(entry);
        }
    }

    // Recurring pass over what survived; matching entries fire but stay put.
    for entry in &retained {
        if entry.kind() == ObligationKind::Recurring && recurrence::is_due(entry, today) {
            apply_effect(accounts, entry, transaction_type, now, new_records, warnings);
        }
    }

    retained
}

fn apply_effect(
    accounts: &mut [Account],
    entry: &Obligation,
    transaction_type: TransactionType,
    now: DateTime<Utc>,
    new_records: &mut Vec<TransactionRecord>,
    warnings: &mut Vec<ProcessWarning>,
) {
    let account = entry
        .account_id
        .as_deref()
        .and_then(|id| accounts.iter_mut().find(|account| account.id == id));
    let Some(account) = account else {
        warnings.push(ProcessWarning::UnknownAccount {
            obligation_id: entry.id.clone(),
            account_id: entry.account_id.clone().unwrap_or_default(),
        });
        return;
    };
    match transaction_type {
        TransactionType::Debt => account.balance -= entry.amount,
        TransactionType::Income => account.balance += entry.amount,
    }
    new_records.push(TransactionRecord::executed(entry, transaction_type, now));
}

/// Summary of one completed processing pass.
#[derive(Debug, Clone)]
pub struct ProcessReport {
    pub executed_at: DateTime<Utc>,
    pub debts_settled: usize,
    pub incomes_settled: usize,
    pub records_appended: usize,
    pub warnings: Vec<ProcessWarning>,
}

/// Outcome of a single `run()` request.
#[derive(Debug)]
pub enum RunOutcome {
    /// The pass ran to completion, possibly with warnings.
    Completed(ProcessReport),
    /// Another pass was already in flight; this request was dropped without
    /// touching storage.
    AlreadyRunning,
}

impl RunOutcome {
    /// The completed report, if this request actually ran.
    pub fn report(self) -> Option<ProcessReport> {
        match self {
            RunOutcome::Completed(report) => Some(report),
            RunOutcome::AlreadyRunning => None,
        }
    }
}

/// Drives one processing pass against the persistence port whenever the host
/// application returns to the foreground.
///
/// Passes are single-flight: a `run()` issued while another pass is in flight
/// is dropped in favor of the one already running, so two interleaved passes
/// can never race the storage read-modify-write cycles against each other.
pub struct DueTransactionProcessor {
    store: Arc<dyn FinanceStore>,
    clock: Arc<dyn Clock>,
    in_flight: Mutex<()>,
}

impl DueTransactionProcessor {
    pub fn new(store: Arc<dyn FinanceStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn FinanceStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            in_flight: Mutex::new(()),
        }
    }

    /// Runs one processing pass. Failures never escape this boundary: a load
    /// failure degrades to an empty collection, a save failure to a dropped
    /// write, and each degradation is surfaced as a warning on the report.
    pub fn run(&self) -> RunOutcome {
        let _guard = match self.in_flight.try_lock() {
            Ok(guard) => guard,
            // A poisoned guard only means an earlier pass panicked; the lock
            // itself is free again.
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => {
                warn!("a processing pass is already in flight; dropping this request");
                return RunOutcome::AlreadyRunning;
            }
        };

        let now = self.clock.now();
        let today = self.clock.today();
        info!(%now, %today, "checking for due transactions");

        let mut warnings = Vec::new();
        let accounts = load_or_empty(
            self.store.load_accounts(),
            Collection::Accounts,
            &mut warnings,
        );
        let debts = load_or_empty(self.store.load_debts(), Collection::Debts, &mut warnings);
        let incomes = load_or_empty(self.store.load_income(), Collection::Income, &mut warnings);

        let PassOutcome {
            accounts,
            debts,
            incomes,
            new_records,
            warnings: pass_warnings,
        } = process_due(
            LedgerSnapshot {
                accounts,
                debts,
                incomes,
            },
            now,
            today,
        );
        warnings.extend(pass_warnings);

        save_or_warn(
            self.store.save_accounts(&accounts),
            Collection::Accounts,
            &mut warnings,
        );
        save_or_warn(self.store.save_debts(&debts), Collection::Debts, &mut warnings);
        save_or_warn(
            self.store.save_income(&incomes),
            Collection::Income,
            &mut warnings,
        );

        let debts_settled = new_records
            .iter()
            .filter(|record| record.transaction_type == Some(TransactionType::Debt))
            .count();
        let incomes_settled = new_records.len() - debts_settled;

        let mut records_appended = 0usize;
        for record in &new_records {
            match self.store.add_transaction_record(record) {
                Ok(()) => records_appended += 1,
                Err(err) => warnings.push(ProcessWarning::AppendFailed {
                    record_id: record.id.clone(),
                    message: err.to_string(),
                }),
            }
        }

        for warning in &warnings {
            warn!(%warning, "processing pass warning");
        }
        info!(
            debts_settled,
            incomes_settled,
            records_appended,
            warning_count = warnings.len(),
            "due transactions processed"
        );

        RunOutcome::Completed(ProcessReport {
            executed_at: now,
            debts_settled,
            incomes_settled,
            records_appended,
            warnings,
        })
    }
}

fn load_or_empty<T>(
    result: crate::storage::Result<Vec<T>>,
    collection: Collection,
    warnings: &mut Vec<ProcessWarning>,
) -> Vec<T> {
    result.unwrap_or_else(|err| {
        warnings.push(ProcessWarning::LoadFailed {
            collection,
            message: err.to_string(),
        });
        Vec::new()
    })
}

fn save_or_warn(
    result: crate::storage::Result<()>,
    collection: Collection,
    warnings: &mut Vec<ProcessWarning>,
) {
    if let Err(err) = result {
        warnings.push(ProcessWarning::SaveFailed {
            collection,
            message: err.to_string(),
        });
    }
}
