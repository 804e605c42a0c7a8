//! `gatherly-registry` — account records and the Account Registry service.
//!
//! The registry owns every mutation of the account collection: registration,
//! authentication, partial updates, and the atomic manager-performance
//! counter. It enforces the manager-skill and email-uniqueness invariants
//! before any write reaches the store.

pub mod account;
pub mod in_memory;
pub mod registry;
pub mod store;

pub use account::{Account, AccountPatch, AccountView, NewAccount, Performance};
pub use in_memory::InMemoryAccountStore;
pub use registry::{AccountRegistry, RegistryError};
pub use store::AccountStore;
