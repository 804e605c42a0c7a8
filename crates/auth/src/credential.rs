//! Credential store: password hashing and verification.
//!
//! Hashing uses argon2 with a fresh random salt per call, so two hashes of
//! the same plaintext never match byte-for-byte. Cost parameters are fixed at
//! build time, which bounds the worst-case latency of an authentication
//! attempt regardless of attacker-supplied input.

use argon2::Config;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SALT_LEN: usize = 16;

/// An encoded argon2 password hash.
///
/// Opaque by construction: `Debug` redacts, and the type is never part of an
/// API response representation.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already-encoded hash (e.g. loaded from the document store).
    pub fn from_encoded(encoded: String) -> Self {
        Self(encoded)
    }

    pub fn as_encoded(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("PasswordHash([REDACTED])")
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("password hashing failed")]
    Hash,
}

/// Hash a plaintext password.
///
/// Salted per call: repeated invocations with the same plaintext produce
/// different encodings, all of which verify.
pub fn hash_password(plaintext: &str) -> Result<PasswordHash, CredentialError> {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill(&mut salt[..]);
    let encoded = argon2::hash_encoded(plaintext.as_bytes(), &salt, &Config::default())
        .map_err(|_| CredentialError::Hash)?;
    Ok(PasswordHash(encoded))
}

/// Verify a plaintext password against a stored hash.
///
/// Never errors: a malformed or mismatching hash yields `false`.
pub fn verify_password(plaintext: &str, hash: &PasswordHash) -> bool {
    argon2::verify_encoded(&hash.0, plaintext.as_bytes()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash));
        assert!(!verify_password("correct horse battery stapler", &hash));
    }

    #[test]
    fn same_plaintext_hashes_differently_but_both_verify() {
        let a = hash_password("hunter22").unwrap();
        let b = hash_password("hunter22").unwrap();
        assert_ne!(a.as_encoded(), b.as_encoded());
        assert!(verify_password("hunter22", &a));
        assert!(verify_password("hunter22", &b));
    }

    #[test]
    fn verify_against_foreign_hash_fails() {
        let a = hash_password("alpha").unwrap();
        let b = hash_password("bravo").unwrap();
        assert!(!verify_password("alpha", &b));
        assert!(!verify_password("bravo", &a));
    }

    #[test]
    fn garbage_hash_verifies_false_without_panicking() {
        let garbage = PasswordHash::from_encoded("not-an-argon2-encoding".to_string());
        assert!(!verify_password("anything", &garbage));
    }

    #[test]
    fn debug_output_redacts_the_hash() {
        let hash = hash_password("secret").unwrap();
        assert_eq!(format!("{hash:?}"), "PasswordHash([REDACTED])");
    }
}
