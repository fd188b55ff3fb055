use crate::domain::account::Account;
use crate::storage::FinanceStore;

use super::{ServiceError, ServiceResult};

pub struct AccountService;

impl AccountService {
    pub fn list(store: &dyn FinanceStore) -> ServiceResult<Vec<Account>> {
        Ok(store.load_accounts()?)
    }

    pub fn add(store: &dyn FinanceStore, account: Account) -> ServiceResult<()> {
        let mut accounts = store.load_accounts()?;
        if accounts.iter().any(|existing| existing.id == account.id) {
            return Err(ServiceError::Invalid(format!(
                "Account `{}` already exists",
                account.id
            )));
        }
        accounts.push(account);
        store.save_accounts(&accounts)?;
        Ok(())
    }

    pub fn update(store: &dyn FinanceStore, changes: Account) -> ServiceResult<()> {
        let mut accounts = store.load_accounts()?;
        let slot = accounts
            .iter_mut()
            .find(|account| account.id == changes.id)
            .ok_or_else(|| ServiceError::Invalid("Account not found".into()))?;
        *slot = changes;
        store.save_accounts(&accounts)?;
        Ok(())
    }

    pub fn remove(store: &dyn FinanceStore, id: &str) -> ServiceResult<()> {
        let debts = store.load_debts()?;
        let income = store.load_income()?;
        if debts
            .iter()
            .chain(income.iter())
            .any(|entry| entry.account_id.as_deref() == Some(id))
        {
            return Err(ServiceError::Invalid(
                "Account has linked debts or income streams".into(),
            ));
        }
        let mut accounts = store.load_accounts()?;
        let before = accounts.len();
        accounts.retain(|account| account.id != id);
        if accounts.len() == before {
            return Err(ServiceError::Invalid("Account not found".into()));
        }
        store.save_accounts(&accounts)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::obligation::Obligation;
    use crate::storage::MemoryStore;
    use chrono::Utc;

    #[test]
    fn add_rejects_duplicate_ids() {
        let store = MemoryStore::new();
        let account = Account::new("Checking", 100.0);
        AccountService::add(&store, account.clone()).expect("first add");
        assert!(matches!(
            AccountService::add(&store, account),
            Err(ServiceError::Invalid(_))
        ));
    }

    #[test]
    fn update_replaces_matching_account() {
        let store = MemoryStore::new();
        let mut account = Account::new("Checking", 100.0);
        AccountService::add(&store, account.clone()).expect("add");

        account.balance = 250.0;
        AccountService::update(&store, account.clone()).expect("update");
        assert_eq!(AccountService::list(&store).expect("list"), vec![account]);
    }

    #[test]
    fn remove_refuses_accounts_with_linked_entries() {
        let store = MemoryStore::new();
        let account = Account::new("Checking", 100.0);
        let debt = Obligation::one_time("Loan", 30.0, account.id.clone(), Utc::now());
        AccountService::add(&store, account.clone()).expect("add");
        store.save_debts(&[debt]).expect("seed debt");

        assert!(matches!(
            AccountService::remove(&store, &account.id),
            Err(ServiceError::Invalid(_))
        ));
    }
}
