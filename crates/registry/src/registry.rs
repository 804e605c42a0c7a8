//! The Account Registry service.

use std::sync::{Arc, OnceLock};

use chrono::Utc;
use thiserror::Error;

use gatherly_auth::{
    CredentialError, Identity, PasswordHash, Role, hash_password, verify_password,
};
use gatherly_core::{AccountId, DomainError, StoreError};

use crate::account::{
    Account, AccountPatch, NewAccount, normalize_email, normalize_skills, validate_email,
    validate_name, validate_password, validate_phone_number, validate_rating,
};
use crate::store::AccountStore;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistryError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The email is already registered. Deliberately distinguishable from a
    /// generic validation failure.
    #[error("email already registered")]
    DuplicateEmail,

    /// The manager-skill invariant was violated.
    #[error("managers must list at least one skill")]
    InvalidRoleSkills,

    /// Login failed. Identical for unknown email and wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The caller may not alter privilege-bearing fields.
    #[error("only admins may change role or skills")]
    Forbidden,

    #[error("account not found")]
    NotFound,

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => RegistryError::NotFound,
            other => RegistryError::Store(other),
        }
    }
}

/// Creates, authenticates, and updates accounts.
///
/// The registry (together with the event engine for attendee writes) is the
/// only component allowed to mutate persisted state; the token service and
/// access gate never touch it.
pub struct AccountRegistry {
    store: Arc<dyn AccountStore>,
}

impl AccountRegistry {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Register a new account.
    ///
    /// All invariants are checked before the insert: nothing is persisted on
    /// a validation failure.
    pub fn register(&self, new: NewAccount) -> Result<Account, RegistryError> {
        validate_name(&new.name)?;
        let email = normalize_email(&new.email);
        validate_email(&email)?;
        validate_password(&new.password)?;
        if let Some(phone) = new.phone_number.as_deref() {
            validate_phone_number(phone)?;
        }

        let skills = normalize_skills(new.skills);
        ensure_role_skills(new.role, &skills)?;

        if self.store.find_by_email(&email)?.is_some() {
            return Err(RegistryError::DuplicateEmail);
        }

        let account = Account {
            id: AccountId::new(),
            name: new.name.trim().to_string(),
            email,
            password_hash: hash_password(&new.password)?,
            role: new.role,
            skills,
            availability: new.availability,
            performance: Default::default(),
            address: new.address,
            phone_number: new.phone_number,
            last_login: None,
            created_at: Utc::now(),
        };

        // The store re-checks uniqueness under its own write guard, so a
        // racing duplicate still surfaces as DuplicateEmail.
        let account = self.store.insert(account).map_err(map_email_conflict)?;
        tracing::debug!(account_id = %account.id, role = %account.role, "account registered");
        Ok(account)
    }

    /// Authenticate by email and password.
    ///
    /// Unknown email and wrong password return the identical error value, and
    /// the unknown-email path burns a verification against a fixed hash so
    /// the two failures cost the same.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Account, RegistryError> {
        let email = normalize_email(email);

        let mut account = match self.store.find_by_email(&email)? {
            Some(account) => account,
            None => {
                let _ = verify_password(password, dummy_hash());
                return Err(RegistryError::InvalidCredentials);
            }
        };

        if !verify_password(password, &account.password_hash) {
            tracing::debug!("login failed");
            return Err(RegistryError::InvalidCredentials);
        }

        let now = Utc::now();
        self.store.record_login(account.id, now)?;
        account.last_login = Some(now);
        Ok(account)
    }

    /// Merge a partial update into an account.
    ///
    /// Only fields present in the patch are touched. Invariants are
    /// re-validated on the merged record before the write. Role and skills
    /// are privilege-bearing: only admin callers may change them.
    pub fn update(
        &self,
        caller: &Identity,
        id: AccountId,
        patch: AccountPatch,
    ) -> Result<Account, RegistryError> {
        if patch.touches_privileges() && caller.role != Role::Admin {
            return Err(RegistryError::Forbidden);
        }

        let mut account = self.store.get(id)?.ok_or(RegistryError::NotFound)?;

        if let Some(name) = patch.name {
            validate_name(&name)?;
            account.name = name.trim().to_string();
        }
        if let Some(email) = patch.email {
            let email = normalize_email(&email);
            validate_email(&email)?;
            if email != account.email && self.store.find_by_email(&email)?.is_some() {
                return Err(RegistryError::DuplicateEmail);
            }
            account.email = email;
        }
        if let Some(role) = patch.role {
            account.role = role;
        }
        if let Some(skills) = patch.skills {
            account.skills = normalize_skills(skills);
        }
        if let Some(availability) = patch.availability {
            account.availability = availability;
        }
        if let Some(address) = patch.address {
            account.address = Some(address);
        }
        if let Some(phone) = patch.phone_number {
            validate_phone_number(&phone)?;
            account.phone_number = Some(phone);
        }
        if let Some(rating) = patch.rating {
            validate_rating(rating)?;
            account.performance.rating = rating;
        }
        if let Some(password) = patch.password {
            validate_password(&password)?;
            // Re-hash only a genuinely new plaintext; an unchanged password
            // keeps the stored hash.
            if !verify_password(&password, &account.password_hash) {
                account.password_hash = hash_password(&password)?;
            }
        }

        ensure_role_skills(account.role, &account.skills)?;

        let account = self.store.update(account).map_err(map_email_conflict)?;
        Ok(account)
    }

    pub fn get(&self, id: AccountId) -> Result<Account, RegistryError> {
        self.store.get(id)?.ok_or(RegistryError::NotFound)
    }

    pub fn exists(&self, id: AccountId) -> Result<bool, RegistryError> {
        Ok(self.store.get(id)?.is_some())
    }

    pub fn list(&self) -> Result<Vec<Account>, RegistryError> {
        Ok(self.store.list()?)
    }

    pub fn delete(&self, id: AccountId) -> Result<(), RegistryError> {
        Ok(self.store.delete(id)?)
    }

    /// Atomic `events_managed += 1` for an owning manager.
    pub fn increment_events_managed(&self, id: AccountId) -> Result<(), RegistryError> {
        Ok(self.store.increment_events_managed(id)?)
    }
}

fn ensure_role_skills(role: Role, skills: &[String]) -> Result<(), RegistryError> {
    if role == Role::Manager && skills.is_empty() {
        return Err(RegistryError::InvalidRoleSkills);
    }
    Ok(())
}

fn map_email_conflict(err: StoreError) -> RegistryError {
    match err {
        StoreError::Conflict(_) => RegistryError::DuplicateEmail,
        other => other.into(),
    }
}

fn dummy_hash() -> &'static PasswordHash {
    static DUMMY: OnceLock<PasswordHash> = OnceLock::new();
    DUMMY.get_or_init(|| {
        hash_password("gatherly.dummy")
            .unwrap_or_else(|_| PasswordHash::from_encoded(String::new()))
    })
}
