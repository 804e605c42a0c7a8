//! `gatherly-core` — domain foundation building blocks.
//!
//! This crate contains the shared identifier and error primitives used by the
//! registry, event, and auth crates. No infrastructure concerns live here.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult, StoreError};
pub use id::{AccountId, EventId};
