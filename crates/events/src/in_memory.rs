use std::collections::HashMap;
use std::sync::RwLock;

use gatherly_core::{AccountId, EventId, StoreError};

use crate::event::{EventFilter, EventRecord};
use crate::store::{AttendeeAdd, EventStore};

/// In-memory event store.
///
/// Intended for tests/dev. Not optimized for performance. The conditional
/// attendee append runs under one write guard, which is what makes it a
/// single-document atomic operation.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: RwLock<HashMap<EventId, EventRecord>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventStore for InMemoryEventStore {
    fn insert(&self, event: EventRecord) -> Result<EventRecord, StoreError> {
        let mut events = self
            .events
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        events.insert(event.id, event.clone());
        Ok(event)
    }

    fn get(&self, id: EventId) -> Result<Option<EventRecord>, StoreError> {
        let events = self
            .events
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        Ok(events.get(&id).cloned())
    }

    fn update(&self, event: EventRecord) -> Result<EventRecord, StoreError> {
        let mut events = self
            .events
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        if !events.contains_key(&event.id) {
            return Err(StoreError::NotFound);
        }
        events.insert(event.id, event.clone());
        Ok(event)
    }

    fn delete(&self, id: EventId) -> Result<(), StoreError> {
        let mut events = self
            .events
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        events.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    fn list(&self, filter: &EventFilter) -> Result<Vec<EventRecord>, StoreError> {
        let events = self
            .events
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        let mut matching: Vec<EventRecord> = events
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        matching.sort_by_key(|e| e.date);
        Ok(matching)
    }

    fn add_attendee(&self, id: EventId, attendee: AccountId) -> Result<AttendeeAdd, StoreError> {
        let mut events = self
            .events
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        let event = events.get_mut(&id).ok_or(StoreError::NotFound)?;

        if event.attendees.contains(&attendee) {
            return Ok(AttendeeAdd::AlreadyPresent);
        }
        event.attendees.push(attendee);
        Ok(AttendeeAdd::Added(event.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use crate::event::Category;

    use super::*;

    fn event() -> EventRecord {
        EventRecord {
            id: EventId::new(),
            title: "Launch".to_string(),
            description: "Product launch party".to_string(),
            date: Utc::now(),
            location: "Main hall".to_string(),
            category: Category::Tech,
            manager: AccountId::new(),
            attendees: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn add_attendee_is_added_then_already_present() {
        let store = InMemoryEventStore::new();
        let id = store.insert(event()).unwrap().id;
        let attendee = AccountId::new();

        match store.add_attendee(id, attendee).unwrap() {
            AttendeeAdd::Added(e) => assert_eq!(e.attendees, vec![attendee]),
            AttendeeAdd::AlreadyPresent => panic!("first add must append"),
        }
        assert_eq!(
            store.add_attendee(id, attendee).unwrap(),
            AttendeeAdd::AlreadyPresent
        );
        assert_eq!(store.get(id).unwrap().unwrap().attendees.len(), 1);
    }

    #[test]
    fn racing_attendee_adds_produce_exactly_one_append() {
        let store = Arc::new(InMemoryEventStore::new());
        let id = store.insert(event()).unwrap().id;
        let attendee = AccountId::new();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                store.add_attendee(id, attendee).unwrap()
            }));
        }

        let added = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|outcome| matches!(outcome, AttendeeAdd::Added(_)))
            .count();

        assert_eq!(added, 1);
        assert_eq!(store.get(id).unwrap().unwrap().attendees, vec![attendee]);
    }

    #[test]
    fn update_of_missing_event_is_not_found() {
        let store = InMemoryEventStore::new();
        assert_eq!(store.update(event()).unwrap_err(), StoreError::NotFound);
    }
}
