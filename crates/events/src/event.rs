//! Event record, inputs, and field validation.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gatherly_core::{AccountId, DomainError, DomainResult, EventId};

pub const MIN_TITLE_LEN: usize = 3;
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// Event category. Closed set.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    Music,
    Business,
    Tech,
    Food,
    Comedy,
    #[default]
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Music => "Music",
            Category::Business => "Business",
            Category::Tech => "Tech",
            Category::Food => "Food",
            Category::Comedy => "Comedy",
            Category::Other => "Other",
        }
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Music" => Ok(Category::Music),
            "Business" => Ok(Category::Business),
            "Tech" => Ok(Category::Tech),
            "Food" => Ok(Category::Food),
            "Comedy" => Ok(Category::Comedy),
            "Other" => Ok(Category::Other),
            other => Err(DomainError::validation(format!("unknown category: {other}"))),
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An owned event.
///
/// `manager` is immutable after creation; there is deliberately no way to
/// patch it. Attendee membership only ever grows (no unregister operation),
/// and never contains duplicates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub category: Category,
    /// The owning manager's account id.
    pub manager: AccountId,
    pub attendees: Vec<AccountId>,
    pub created_at: DateTime<Utc>,
}

/// Input for event creation.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub attendees: Vec<AccountId>,
}

/// Partial update: only fields present in the request are merged.
///
/// The owner is not part of the patch by construction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub category: Option<Category>,
    pub attendees: Option<Vec<AccountId>>,
}

/// Listing filter: by category and/or earliest date.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilter {
    pub category: Option<Category>,
    /// Only events on or after this instant.
    pub from: Option<DateTime<Utc>>,
}

impl EventFilter {
    pub fn matches(&self, event: &EventRecord) -> bool {
        if let Some(category) = self.category {
            if event.category != category {
                return false;
            }
        }
        if let Some(from) = self.from {
            if event.date < from {
                return false;
            }
        }
        true
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Field validation
// ─────────────────────────────────────────────────────────────────────────────

pub fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().chars().count() < MIN_TITLE_LEN {
        return Err(DomainError::validation(format!(
            "title must be at least {MIN_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> DomainResult<()> {
    if description.trim().chars().count() < MIN_DESCRIPTION_LEN {
        return Err(DomainError::validation(format!(
            "description must be at least {MIN_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_location(location: &str) -> DomainResult<()> {
    if location.trim().is_empty() {
        return Err(DomainError::validation("location cannot be empty"));
    }
    Ok(())
}
