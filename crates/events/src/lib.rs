//! `gatherly-events` — the Event Ownership & Registration Engine.
//!
//! Events are owned resources: only the creating manager may mutate or delete
//! one, attendee membership is duplicate-free, and event creation feeds the
//! owning manager's performance counter through the account registry.

pub mod engine;
pub mod event;
pub mod in_memory;
pub mod store;

pub use engine::{CreateOutcome, EngineError, EventEngine};
pub use event::{Category, EventDraft, EventFilter, EventPatch, EventRecord};
pub use in_memory::InMemoryEventStore;
pub use store::{AttendeeAdd, EventStore};
