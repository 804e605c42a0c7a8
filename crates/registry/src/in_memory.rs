use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use gatherly_core::{AccountId, StoreError};

use crate::account::Account;
use crate::store::AccountStore;

/// In-memory account store.
///
/// Intended for tests/dev. Not optimized for performance. Every operation
/// runs under a single lock acquisition, which gives the conditional writes
/// their single-document atomicity.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn email_taken(accounts: &HashMap<AccountId, Account>, email: &str, except: Option<AccountId>) -> bool {
        accounts
            .values()
            .any(|a| a.email == email && Some(a.id) != except)
    }
}

impl AccountStore for InMemoryAccountStore {
    fn insert(&self, account: Account) -> Result<Account, StoreError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;

        if Self::email_taken(&accounts, &account.email, None) {
            return Err(StoreError::conflict("email"));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    fn get(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        Ok(accounts.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    fn update(&self, account: Account) -> Result<Account, StoreError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;

        if !accounts.contains_key(&account.id) {
            return Err(StoreError::NotFound);
        }
        if Self::email_taken(&accounts, &account.email, Some(account.id)) {
            return Err(StoreError::conflict("email"));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    fn delete(&self, id: AccountId) -> Result<(), StoreError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        accounts.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    fn list(&self) -> Result<Vec<Account>, StoreError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        let mut all: Vec<Account> = accounts.values().cloned().collect();
        all.sort_by_key(|a| a.created_at);
        Ok(all)
    }

    fn increment_events_managed(&self, id: AccountId) -> Result<(), StoreError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        let account = accounts.get_mut(&id).ok_or(StoreError::NotFound)?;
        account.performance.events_managed += 1;
        Ok(())
    }

    fn record_login(&self, id: AccountId, at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        let account = accounts.get_mut(&id).ok_or(StoreError::NotFound)?;
        account.last_login = Some(at);
        Ok(())
    }
}
