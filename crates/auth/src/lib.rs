//! `gatherly-auth` — pure authentication/authorization boundary.
//!
//! This crate owns credential hashing, signed session tokens, the closed role
//! set, and the access gate. It is intentionally decoupled from HTTP and
//! storage: nothing here performs persistence I/O.

pub mod claims;
pub mod credential;
pub mod gate;
pub mod roles;
pub mod token;

pub use claims::{Claims, TokenValidationError, validate_claims};
pub use credential::{CredentialError, PasswordHash, hash_password, verify_password};
pub use gate::{AuthError, Identity, authorize};
pub use roles::Role;
pub use token::{SignedToken, TokenService};
