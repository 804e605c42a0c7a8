//! Event storage port.
//!
//! `add_attendee` is the one operation that must be conditional inside the
//! store: two concurrent registrations for the same (event, account) pair
//! must not both observe "absent" and both append.

use gatherly_core::{AccountId, EventId, StoreError};

use crate::event::{EventFilter, EventRecord};

/// Outcome of an atomic attendee append.
#[derive(Debug, Clone, PartialEq)]
pub enum AttendeeAdd {
    /// The attendee was absent and has been appended.
    Added(EventRecord),
    /// The attendee was already a member; the document is unchanged.
    AlreadyPresent,
}

pub trait EventStore: Send + Sync {
    fn insert(&self, event: EventRecord) -> Result<EventRecord, StoreError>;

    fn get(&self, id: EventId) -> Result<Option<EventRecord>, StoreError>;

    /// Replace the stored document, keyed by `event.id`.
    fn update(&self, event: EventRecord) -> Result<EventRecord, StoreError>;

    fn delete(&self, id: EventId) -> Result<(), StoreError>;

    fn list(&self, filter: &EventFilter) -> Result<Vec<EventRecord>, StoreError>;

    /// Atomic append-if-absent of an attendee.
    fn add_attendee(&self, id: EventId, attendee: AccountId) -> Result<AttendeeAdd, StoreError>;
}
