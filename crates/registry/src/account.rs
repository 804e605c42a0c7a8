//! Account record, inputs, and field validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gatherly_auth::{PasswordHash, Role};
use gatherly_core::{AccountId, DomainError, DomainResult};

/// Minimum plaintext password length accepted at registration and update.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Performance counters kept on an account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    /// Number of events this account has created as owning manager.
    pub events_managed: u64,
    /// Rating in [0, 5].
    pub rating: f64,
}

/// A registered identity.
///
/// The password hash is opaque and the struct deliberately does not implement
/// `Serialize`; responses go through [`AccountView`], which never carries the
/// hash.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    /// Unique across all accounts, stored trimmed and lowercased.
    pub email: String,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub skills: Vec<String>,
    pub availability: bool,
    pub performance: Performance,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Sanitized representation for API responses.
    pub fn view(&self) -> AccountView {
        AccountView {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            skills: self.skills.clone(),
            availability: self.availability,
            performance: self.performance.clone(),
            address: self.address.clone(),
            phone_number: self.phone_number.clone(),
            last_login: self.last_login,
            created_at: self.created_at,
        }
    }
}

/// What the platform exposes about an account. No credential material.
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub skills: Vec<String>,
    pub availability: bool,
    pub performance: Performance,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Input for account registration.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default = "default_availability")]
    pub availability: bool,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

fn default_availability() -> bool {
    true
}

/// Partial update: only fields present in the request are merged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    /// New plaintext password; re-hashed only if it differs from storage.
    pub password: Option<String>,
    pub role: Option<Role>,
    pub skills: Option<Vec<String>>,
    pub availability: Option<bool>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub rating: Option<f64>,
}

impl AccountPatch {
    /// Whether this patch touches privilege-bearing fields.
    pub fn touches_privileges(&self) -> bool {
        self.role.is_some() || self.skills.is_some()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Field validation / normalization
// ─────────────────────────────────────────────────────────────────────────────

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trim skill entries and drop empties.
pub fn normalize_skills(skills: Vec<String>) -> Vec<String> {
    skills
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> DomainResult<()> {
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::validation("invalid email format"));
    }
    Ok(())
}

pub fn validate_password(plaintext: &str) -> DomainResult<()> {
    if plaintext.len() < MIN_PASSWORD_LEN {
        return Err(DomainError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Optional `+` prefix, then 10-15 digits/spaces/dashes.
pub fn validate_phone_number(phone: &str) -> DomainResult<()> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    let ok = (10..=15).contains(&digits.len())
        && digits
            .chars()
            .all(|c| c.is_ascii_digit() || c == ' ' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(DomainError::validation("invalid phone number"))
    }
}

pub fn validate_rating(rating: f64) -> DomainResult<()> {
    if (0.0..=5.0).contains(&rating) {
        Ok(())
    } else {
        Err(DomainError::validation("rating must be within [0, 5]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn skills_are_trimmed_and_empties_dropped() {
        let skills = normalize_skills(vec![
            " logistics ".to_string(),
            "".to_string(),
            "   ".to_string(),
            "catering".to_string(),
        ]);
        assert_eq!(skills, vec!["logistics".to_string(), "catering".to_string()]);
    }

    #[test]
    fn phone_numbers_validate_by_shape() {
        assert!(validate_phone_number("+1 555-123-4567").is_ok());
        assert!(validate_phone_number("5551234567").is_ok());
        assert!(validate_phone_number("12345").is_err());
        assert!(validate_phone_number("555-123-456x").is_err());
    }

    #[test]
    fn rating_bounds_are_enforced() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(5.0).is_ok());
        assert!(validate_rating(5.1).is_err());
        assert!(validate_rating(-0.1).is_err());
    }
}
