//! The Event Ownership & Registration Engine.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use gatherly_auth::{Identity, Role};
use gatherly_core::{AccountId, DomainError, EventId, StoreError};
use gatherly_registry::{AccountRegistry, RegistryError};

use crate::event::{
    EventDraft, EventFilter, EventPatch, EventRecord, validate_description, validate_location,
    validate_title,
};
use crate::store::{AttendeeAdd, EventStore};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("event not found")]
    NotFound,

    /// Ownership violation: the caller does not manage this event, or a
    /// non-manager attempted to create one.
    #[error("not authorized for this event")]
    Forbidden,

    /// The caller is already in the attendee set; nothing was appended.
    #[error("already registered for this event")]
    AlreadyRegistered,

    /// A supplied attendee id does not resolve to an account.
    #[error("one or more attendees not found")]
    UnknownAttendee,

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => EngineError::NotFound,
            other => EngineError::Store(other),
        }
    }
}

/// Outcome of event creation.
///
/// The manager counter is a dependent write after the event write. When it
/// fails the event still exists; the lag is surfaced rather than rolled back,
/// so monitoring can reconcile the counter later.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created(EventRecord),
    PartialSuccess {
        event: EventRecord,
        counter_error: RegistryError,
    },
}

impl CreateOutcome {
    pub fn event(&self) -> &EventRecord {
        match self {
            CreateOutcome::Created(event) => event,
            CreateOutcome::PartialSuccess { event, .. } => event,
        }
    }

    pub fn counter_lagged(&self) -> bool {
        matches!(self, CreateOutcome::PartialSuccess { .. })
    }
}

/// Enforces event ownership, duplicate-free registration, and the
/// cross-entity manager counter.
pub struct EventEngine {
    events: Arc<dyn EventStore>,
    accounts: Arc<AccountRegistry>,
}

impl EventEngine {
    pub fn new(events: Arc<dyn EventStore>, accounts: Arc<AccountRegistry>) -> Self {
        Self { events, accounts }
    }

    /// Create an event owned by the calling manager.
    ///
    /// The owner is always the caller; it cannot be supplied. After the event
    /// write succeeds, the owner's `events_managed` counter is incremented as
    /// a dependent write (see [`CreateOutcome`]).
    pub fn create(&self, identity: &Identity, draft: EventDraft) -> Result<CreateOutcome, EngineError> {
        if identity.role != Role::Manager {
            return Err(EngineError::Forbidden);
        }

        validate_title(&draft.title)?;
        validate_description(&draft.description)?;
        validate_location(&draft.location)?;

        let attendees = self.resolve_attendees(draft.attendees)?;

        let event = EventRecord {
            id: EventId::new(),
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            date: draft.date,
            location: draft.location.trim().to_string(),
            category: draft.category,
            manager: identity.account_id,
            attendees,
            created_at: Utc::now(),
        };

        let event = self.events.insert(event)?;

        match self.accounts.increment_events_managed(identity.account_id) {
            Ok(()) => Ok(CreateOutcome::Created(event)),
            Err(counter_error) => {
                tracing::warn!(
                    event_id = %event.id,
                    manager = %identity.account_id,
                    error = %counter_error,
                    "event created but manager counter increment failed"
                );
                Ok(CreateOutcome::PartialSuccess {
                    event,
                    counter_error,
                })
            }
        }
    }

    /// Merge a partial update into an event. Owner-only.
    pub fn update(
        &self,
        identity: &Identity,
        id: EventId,
        patch: EventPatch,
    ) -> Result<EventRecord, EngineError> {
        let mut event = self.owned_event(identity, id)?;

        if let Some(title) = patch.title {
            validate_title(&title)?;
            event.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            validate_description(&description)?;
            event.description = description.trim().to_string();
        }
        if let Some(date) = patch.date {
            event.date = date;
        }
        if let Some(location) = patch.location {
            validate_location(&location)?;
            event.location = location.trim().to_string();
        }
        if let Some(category) = patch.category {
            event.category = category;
        }
        if let Some(attendees) = patch.attendees {
            event.attendees = self.resolve_attendees(attendees)?;
        }

        Ok(self.events.update(event)?)
    }

    /// Delete an event. Owner-only.
    pub fn delete(&self, identity: &Identity, id: EventId) -> Result<(), EngineError> {
        let event = self.owned_event(identity, id)?;
        Ok(self.events.delete(event.id)?)
    }

    /// Register the caller as an attendee.
    ///
    /// Self-registration only: the attendee is always the caller. The dedup
    /// check and the append are one atomic store operation, so racing calls
    /// for the same pair cannot both succeed. There is no inverse operation.
    pub fn register_attendee(
        &self,
        identity: &Identity,
        id: EventId,
    ) -> Result<EventRecord, EngineError> {
        match self.events.add_attendee(id, identity.account_id)? {
            AttendeeAdd::Added(event) => Ok(event),
            AttendeeAdd::AlreadyPresent => Err(EngineError::AlreadyRegistered),
        }
    }

    pub fn get(&self, id: EventId) -> Result<EventRecord, EngineError> {
        self.events.get(id)?.ok_or(EngineError::NotFound)
    }

    pub fn list(&self, filter: &EventFilter) -> Result<Vec<EventRecord>, EngineError> {
        Ok(self.events.list(filter)?)
    }

    /// Load an event and check ownership: absent is `NotFound`, foreign-owned
    /// is `Forbidden`. The same decision applies to update and delete.
    fn owned_event(&self, identity: &Identity, id: EventId) -> Result<EventRecord, EngineError> {
        let event = self.events.get(id)?.ok_or(EngineError::NotFound)?;
        if event.manager != identity.account_id {
            return Err(EngineError::Forbidden);
        }
        Ok(event)
    }

    /// Dedup a supplied attendee list and require every id to resolve.
    fn resolve_attendees(&self, attendees: Vec<AccountId>) -> Result<Vec<AccountId>, EngineError> {
        let mut unique: Vec<AccountId> = Vec::with_capacity(attendees.len());
        for id in attendees {
            if unique.contains(&id) {
                continue;
            }
            if !self.accounts.exists(id)? {
                return Err(EngineError::UnknownAttendee);
            }
            unique.push(id);
        }
        Ok(unique)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use gatherly_registry::{AccountStore, InMemoryAccountStore, NewAccount};

    use crate::event::Category;
    use crate::in_memory::InMemoryEventStore;

    use super::*;

    struct Fixture {
        engine: EventEngine,
        registry: Arc<AccountRegistry>,
    }

    fn fixture() -> Fixture {
        fixture_with_accounts(Arc::new(InMemoryAccountStore::new()))
    }

    fn fixture_with_accounts(accounts: Arc<dyn AccountStore>) -> Fixture {
        let registry = Arc::new(AccountRegistry::new(accounts));
        let engine = EventEngine::new(
            Arc::new(InMemoryEventStore::new()),
            Arc::clone(&registry),
        );
        Fixture { engine, registry }
    }

    fn register(fixture: &Fixture, email: &str, role: Role, skills: &[&str]) -> Identity {
        let account = fixture
            .registry
            .register(NewAccount {
                name: email.split('@').next().unwrap().to_string(),
                email: email.to_string(),
                password: "secret1".to_string(),
                role,
                skills: skills.iter().map(|s| s.to_string()).collect(),
                availability: true,
                address: None,
                phone_number: None,
            })
            .unwrap();
        Identity {
            account_id: account.id,
            role: account.role,
        }
    }

    fn draft() -> EventDraft {
        EventDraft {
            title: "Launch".to_string(),
            description: "Product launch party".to_string(),
            date: "2026-09-01T18:00:00Z".parse::<DateTime<Utc>>().unwrap(),
            location: "Main hall".to_string(),
            category: Category::Tech,
            attendees: vec![],
        }
    }

    #[test]
    fn manager_creates_event_and_counter_increments() {
        let fx = fixture();
        let alice = register(&fx, "alice@example.com", Role::Manager, &["logistics"]);

        let outcome = fx.engine.create(&alice, draft()).unwrap();
        assert!(!outcome.counter_lagged());
        assert_eq!(outcome.event().manager, alice.account_id);

        let stored = fx.registry.get(alice.account_id).unwrap();
        assert_eq!(stored.performance.events_managed, 1);
    }

    #[test]
    fn non_manager_cannot_create() {
        let fx = fixture();
        let carol = register(&fx, "carol@example.com", Role::User, &[]);
        assert_eq!(fx.engine.create(&carol, draft()).unwrap_err(), EngineError::Forbidden);
    }

    #[test]
    fn short_title_is_rejected_before_any_write() {
        let fx = fixture();
        let alice = register(&fx, "alice@example.com", Role::Manager, &["logistics"]);

        let mut bad = draft();
        bad.title = "Go".to_string();
        assert!(matches!(
            fx.engine.create(&alice, bad).unwrap_err(),
            EngineError::Domain(DomainError::Validation(_))
        ));
        assert!(fx.engine.list(&EventFilter::default()).unwrap().is_empty());
        assert_eq!(
            fx.registry.get(alice.account_id).unwrap().performance.events_managed,
            0
        );
    }

    #[test]
    fn unknown_attendee_in_draft_is_rejected() {
        let fx = fixture();
        let alice = register(&fx, "alice@example.com", Role::Manager, &["logistics"]);

        let mut bad = draft();
        bad.attendees = vec![AccountId::new()];
        assert_eq!(
            fx.engine.create(&alice, bad).unwrap_err(),
            EngineError::UnknownAttendee
        );
    }

    #[test]
    fn duplicate_draft_attendees_are_deduped() {
        let fx = fixture();
        let alice = register(&fx, "alice@example.com", Role::Manager, &["logistics"]);
        let carol = register(&fx, "carol@example.com", Role::User, &[]);

        let mut with_dupes = draft();
        with_dupes.attendees = vec![carol.account_id, carol.account_id];
        let outcome = fx.engine.create(&alice, with_dupes).unwrap();
        assert_eq!(outcome.event().attendees, vec![carol.account_id]);
    }

    #[test]
    fn only_the_owning_manager_may_update_or_delete() {
        let fx = fixture();
        let alice = register(&fx, "alice@example.com", Role::Manager, &["logistics"]);
        let bob = register(&fx, "bob@example.com", Role::Manager, &["catering"]);

        let event_id = fx.engine.create(&alice, draft()).unwrap().event().id;

        let patch = EventPatch {
            title: Some("Launch v2".to_string()),
            ..Default::default()
        };
        assert_eq!(
            fx.engine.update(&bob, event_id, patch.clone()).unwrap_err(),
            EngineError::Forbidden
        );
        assert_eq!(fx.engine.delete(&bob, event_id).unwrap_err(), EngineError::Forbidden);

        let updated = fx.engine.update(&alice, event_id, patch).unwrap();
        assert_eq!(updated.title, "Launch v2");
        assert_eq!(updated.manager, alice.account_id);

        fx.engine.delete(&alice, event_id).unwrap();
        assert_eq!(fx.engine.get(event_id).unwrap_err(), EngineError::NotFound);
    }

    #[test]
    fn update_of_absent_event_is_not_found() {
        let fx = fixture();
        let alice = register(&fx, "alice@example.com", Role::Manager, &["logistics"]);
        assert_eq!(
            fx.engine
                .update(&alice, EventId::new(), EventPatch::default())
                .unwrap_err(),
            EngineError::NotFound
        );
    }

    #[test]
    fn second_registration_for_the_same_event_fails_and_changes_nothing() {
        let fx = fixture();
        let alice = register(&fx, "alice@example.com", Role::Manager, &["logistics"]);
        let carol = register(&fx, "carol@example.com", Role::User, &[]);

        let event_id = fx.engine.create(&alice, draft()).unwrap().event().id;

        let event = fx.engine.register_attendee(&carol, event_id).unwrap();
        assert_eq!(event.attendees, vec![carol.account_id]);

        assert_eq!(
            fx.engine.register_attendee(&carol, event_id).unwrap_err(),
            EngineError::AlreadyRegistered
        );
        assert_eq!(fx.engine.get(event_id).unwrap().attendees.len(), 1);
    }

    #[test]
    fn registering_for_an_absent_event_is_not_found() {
        let fx = fixture();
        let carol = register(&fx, "carol@example.com", Role::User, &[]);
        assert_eq!(
            fx.engine.register_attendee(&carol, EventId::new()).unwrap_err(),
            EngineError::NotFound
        );
    }

    #[test]
    fn list_filters_by_category() {
        let fx = fixture();
        let alice = register(&fx, "alice@example.com", Role::Manager, &["logistics"]);

        fx.engine.create(&alice, draft()).unwrap();
        let mut food = draft();
        food.title = "Tasting".to_string();
        food.category = Category::Food;
        fx.engine.create(&alice, food).unwrap();

        let filter = EventFilter {
            category: Some(Category::Food),
            from: None,
        };
        let listed = fx.engine.list(&filter).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Tasting");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Counter partial success
    // ─────────────────────────────────────────────────────────────────────────

    /// Delegates to an in-memory store, but the counter write always fails.
    struct FailingCounterStore {
        inner: InMemoryAccountStore,
    }

    impl AccountStore for FailingCounterStore {
        fn insert(
            &self,
            account: gatherly_registry::Account,
        ) -> Result<gatherly_registry::Account, StoreError> {
            self.inner.insert(account)
        }

        fn get(&self, id: AccountId) -> Result<Option<gatherly_registry::Account>, StoreError> {
            self.inner.get(id)
        }

        fn find_by_email(
            &self,
            email: &str,
        ) -> Result<Option<gatherly_registry::Account>, StoreError> {
            self.inner.find_by_email(email)
        }

        fn update(
            &self,
            account: gatherly_registry::Account,
        ) -> Result<gatherly_registry::Account, StoreError> {
            self.inner.update(account)
        }

        fn delete(&self, id: AccountId) -> Result<(), StoreError> {
            self.inner.delete(id)
        }

        fn list(&self) -> Result<Vec<gatherly_registry::Account>, StoreError> {
            self.inner.list()
        }

        fn increment_events_managed(&self, _id: AccountId) -> Result<(), StoreError> {
            Err(StoreError::unavailable("simulated outage"))
        }

        fn record_login(&self, id: AccountId, at: DateTime<Utc>) -> Result<(), StoreError> {
            self.inner.record_login(id, at)
        }
    }

    #[test]
    fn counter_failure_after_event_write_is_partial_success() {
        let fx = fixture_with_accounts(Arc::new(FailingCounterStore {
            inner: InMemoryAccountStore::new(),
        }));
        let alice = register(&fx, "alice@example.com", Role::Manager, &["logistics"]);

        let outcome = fx.engine.create(&alice, draft()).unwrap();
        assert!(outcome.counter_lagged());

        // The event write is not rolled back.
        let event_id = outcome.event().id;
        assert_eq!(fx.engine.get(event_id).unwrap().manager, alice.account_id);
        assert_eq!(
            fx.registry.get(alice.account_id).unwrap().performance.events_managed,
            0
        );
    }
}
