//! Account storage port.
//!
//! The platform assumes an external document store with single-document
//! atomicity. This trait is the registry's view of it: plain lookups plus the
//! two writes that must be expressed as atomic document operations
//! (`increment_events_managed`, `record_login`) rather than read-modify-write
//! at the application layer.

use chrono::{DateTime, Utc};

use gatherly_core::{AccountId, StoreError};

use crate::account::Account;

pub trait AccountStore: Send + Sync {
    /// Insert a new account.
    ///
    /// Implementations must reject a duplicate (normalized) email with
    /// `StoreError::Conflict("email")`.
    fn insert(&self, account: Account) -> Result<Account, StoreError>;

    fn get(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// Lookup by normalized email.
    fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Replace the stored document, keyed by `account.id`.
    ///
    /// Email uniqueness is enforced against all other documents.
    fn update(&self, account: Account) -> Result<Account, StoreError>;

    fn delete(&self, id: AccountId) -> Result<(), StoreError>;

    fn list(&self) -> Result<Vec<Account>, StoreError>;

    /// Atomic `performance.events_managed += 1`.
    ///
    /// Concurrent increments must not lose updates.
    fn increment_events_managed(&self, id: AccountId) -> Result<(), StoreError>;

    /// Atomic last-login stamp.
    fn record_login(&self, id: AccountId, at: DateTime<Utc>) -> Result<(), StoreError>;
}
