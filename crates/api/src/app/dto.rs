//! Request/response DTOs and JSON mapping helpers.
//!
//! Registration and patch bodies deserialize directly into the domain input
//! types (`NewAccount`, `AccountPatch`, `EventDraft`, `EventPatch`); only the
//! shapes specific to the HTTP surface live here.

use serde::{Deserialize, Serialize};

use gatherly_auth::SignedToken;
use gatherly_events::EventRecord;
use gatherly_registry::AccountView;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A sanitized account plus a fresh session token.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub account: AccountView,
    pub token: SignedToken,
}

/// Event-creation response.
///
/// `counter_lagged` is true when the event was written but the manager's
/// counter increment failed; the caller sees the success and monitoring can
/// reconcile the counter.
#[derive(Debug, Serialize)]
pub struct CreatedEventResponse {
    pub event: EventRecord,
    pub counter_lagged: bool,
}
