//! End-to-end processing passes over the file-backed store, seeded with raw
//! JSON in the exact shape the mobile app has been persisting.

use std::{fs, sync::Arc};

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use finance_core::core::{DueTransactionProcessor, FixedClock, ProcessWarning, RunOutcome};
use finance_core::storage::{Collection, FinanceStore, JsonStore};

fn processor_at(
    store: &JsonStore,
    year: i32,
    month: u32,
    day: u32,
) -> DueTransactionProcessor {
    let clock = FixedClock::at(Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap());
    DueTransactionProcessor::with_clock(Arc::new(store.clone()), Arc::new(clock))
}

fn completed(outcome: RunOutcome) -> finance_core::core::ProcessReport {
    match outcome {
        RunOutcome::Completed(report) => report,
        RunOutcome::AlreadyRunning => panic!("no other pass should be in flight"),
    }
}

#[test]
fn overdue_one_time_debt_settles_end_to_end() {
    let temp = TempDir::new().expect("temp dir");
    let store = JsonStore::open(temp.path()).expect("store");
    fs::write(
        store.collection_path(Collection::Accounts),
        r#"[{"id":"a1","name":"Checking","balance":100}]"#,
    )
    .expect("seed accounts");
    fs::write(
        store.collection_path(Collection::Debts),
        r#"[{"id":"d1","description":"Loan","amount":30,"accountId":"a1","type":"one-time","dueDate":"2020-01-01T00:00:00Z"}]"#,
    )
    .expect("seed debts");

    let report = completed(processor_at(&store, 2024, 1, 1).run());

    assert_eq!(report.debts_settled, 1);
    assert_eq!(report.records_appended, 1);
    assert!(report.warnings.is_empty());
    assert_eq!(store.load_accounts().expect("accounts")[0].balance, 70.0);
    assert!(store.load_debts().expect("debts").is_empty());

    let history = store.load_transaction_history().expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].amount, 30.0);
    assert_eq!(history[0].account_id.as_deref(), Some("a1"));

    // The on-disk record keeps the app's field spellings.
    let raw =
        fs::read_to_string(store.collection_path(Collection::TransactionHistory)).expect("raw");
    assert!(raw.contains("\"transactionType\": \"debt\""));
    assert!(raw.contains("\"executedAt\""));
}

#[test]
fn weekly_income_fires_and_survives_the_pass() {
    let temp = TempDir::new().expect("temp dir");
    let store = JsonStore::open(temp.path()).expect("store");
    fs::write(
        store.collection_path(Collection::Accounts),
        r#"[{"id":"a1","name":"Checking","balance":0}]"#,
    )
    .expect("seed accounts");
    // Weekday stored capitalized, as older form builds did; 2024-03-15 is a
    // Friday.
    fs::write(
        store.collection_path(Collection::Income),
        r#"[{"id":"i1","description":"Wages","amount":500,"accountId":"a1","type":"recurring","recurringFrequency":"weekly","recurringDay":"Friday"}]"#,
    )
    .expect("seed income");

    let report = completed(processor_at(&store, 2024, 3, 15).run());

    assert_eq!(report.incomes_settled, 1);
    assert_eq!(store.load_accounts().expect("accounts")[0].balance, 500.0);
    assert_eq!(store.load_income().expect("income").len(), 1);

    // The next day the weekday no longer matches; nothing fires.
    let report = completed(processor_at(&store, 2024, 3, 16).run());
    assert_eq!(report.incomes_settled, 0);
    assert_eq!(store.load_accounts().expect("accounts")[0].balance, 500.0);
}

#[test]
fn corrupt_collection_degrades_to_empty_with_warning() {
    let temp = TempDir::new().expect("temp dir");
    let store = JsonStore::open(temp.path()).expect("store");
    fs::write(
        store.collection_path(Collection::Accounts),
        r#"[{"id":"a1","name":"Checking","balance":10}]"#,
    )
    .expect("seed accounts");
    fs::write(store.collection_path(Collection::Debts), "{not json").expect("seed corrupt debts");
    fs::write(
        store.collection_path(Collection::Income),
        r#"[{"id":"i1","description":"Refund","amount":5,"accountId":"a1","type":"one-time","dueDate":"2020-01-01T00:00:00Z"}]"#,
    )
    .expect("seed income");

    let report = completed(processor_at(&store, 2024, 1, 1).run());

    // The pass continues with what it could read.
    assert_eq!(report.incomes_settled, 1);
    assert_eq!(store.load_accounts().expect("accounts")[0].balance, 15.0);
    assert!(report.warnings.iter().any(|warning| matches!(
        warning,
        ProcessWarning::LoadFailed {
            collection: Collection::Debts,
            ..
        }
    )));
}

#[test]
fn monthly_day_31_does_not_fire_in_a_short_month() {
    let temp = TempDir::new().expect("temp dir");
    let store = JsonStore::open(temp.path()).expect("store");
    fs::write(
        store.collection_path(Collection::Accounts),
        r#"[{"id":"a1","name":"Checking","balance":100}]"#,
    )
    .expect("seed accounts");
    fs::write(
        store.collection_path(Collection::Debts),
        r#"[{"id":"d1","description":"Rent","amount":10,"accountId":"a1","type":"recurring","recurringFrequency":"monthly","recurringDayOfMonth":31}]"#,
    )
    .expect("seed debts");

    // April 30th: 30-day month, target day 31 never matches.
    let report = completed(processor_at(&store, 2024, 4, 30).run());
    assert_eq!(report.debts_settled, 0);
    assert_eq!(store.load_accounts().expect("accounts")[0].balance, 100.0);

    // May 31st matches.
    let report = completed(processor_at(&store, 2024, 5, 31).run());
    assert_eq!(report.debts_settled, 1);
    assert_eq!(store.load_accounts().expect("accounts")[0].balance, 90.0);
}
