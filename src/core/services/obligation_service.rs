use chrono::Utc;
use tracing::info;

use crate::domain::{
    obligation::Obligation,
    transaction::{TransactionRecord, TransactionType},
};
use crate::storage::FinanceStore;

use super::{ServiceError, ServiceResult};

/// CRUD over the debts collection. Removing a debt leaves a
/// `debt-deletion` record in the transaction history so the ledger keeps a
/// trace of what was dropped.
pub struct DebtService;

impl DebtService {
    pub fn list(store: &dyn FinanceStore) -> ServiceResult<Vec<Obligation>> {
        Ok(store.load_debts()?)
    }

    pub fn add(store: &dyn FinanceStore, debt: Obligation) -> ServiceResult<()> {
        let mut debts = store.load_debts()?;
        debts.push(debt);
        store.save_debts(&debts)?;
        Ok(())
    }

    pub fn update(store: &dyn FinanceStore, changes: Obligation) -> ServiceResult<()> {
        let mut debts = store.load_debts()?;
        replace_by_id(&mut debts, changes)?;
        store.save_debts(&debts)?;
        Ok(())
    }

    pub fn remove(store: &dyn FinanceStore, id: &str) -> ServiceResult<()> {
        let mut debts = store.load_debts()?;
        let removed = take_by_id(&mut debts, id)?;
        store.save_debts(&debts)?;
        info!(debt_id = %id, "debt removed, appending deletion record");
        let record = TransactionRecord::deletion(&removed, TransactionType::Debt, Utc::now());
        store.add_transaction_record(&record)?;
        Ok(())
    }
}

/// CRUD over the income streams collection, with `income-deletion` records
/// on removal.
pub struct IncomeService;

impl IncomeService {
    pub fn list(store: &dyn FinanceStore) -> ServiceResult<Vec<Obligation>> {
        Ok(store.load_income()?)
    }

    pub fn add(store: &dyn FinanceStore, stream: Obligation) -> ServiceResult<()> {
        let mut income = store.load_income()?;
        income.push(stream);
        store.save_income(&income)?;
        Ok(())
    }

    pub fn update(store: &dyn FinanceStore, changes: Obligation) -> ServiceResult<()> {
        let mut income = store.load_income()?;
        replace_by_id(&mut income, changes)?;
        store.save_income(&income)?;
        Ok(())
    }

    pub fn remove(store: &dyn FinanceStore, id: &str) -> ServiceResult<()> {
        let mut income = store.load_income()?;
        let removed = take_by_id(&mut income, id)?;
        store.save_income(&income)?;
        info!(income_id = %id, "income stream removed, appending deletion record");
        let record = TransactionRecord::deletion(&removed, TransactionType::Income, Utc::now());
        store.add_transaction_record(&record)?;
        Ok(())
    }
}

fn replace_by_id(entries: &mut [Obligation], changes: Obligation) -> ServiceResult<()> {
    let slot = entries
        .iter_mut()
        .find(|entry| entry.id == changes.id)
        .ok_or_else(|| ServiceError::Invalid(format!("No entry with id `{}`", changes.id)))?;
    *slot = changes;
    Ok(())
}

fn take_by_id(entries: &mut Vec<Obligation>, id: &str) -> ServiceResult<Obligation> {
    let index = entries
        .iter()
        .position(|entry| entry.id == id)
        .ok_or_else(|| ServiceError::Invalid(format!("No entry with id `{id}`")))?;
    Ok(entries.remove(index))
}
