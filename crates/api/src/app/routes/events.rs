//! Event creation, mutation, and attendee registration.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use gatherly_auth::Role;
use gatherly_core::EventId;
use gatherly_events::{EventDraft, EventFilter, EventPatch};

use crate::app::dto::CreatedEventResponse;
use crate::app::{errors, services::AppServices};

const MANAGER_ONLY: [Role; 1] = [Role::Manager];

/// Every authenticated role except manager: attendee registration is for
/// callers, managers run events.
const ATTENDEE_ROLES: [Role; 5] = [
    Role::Admin,
    Role::DepartmentHead,
    Role::Supervisor,
    Role::Volunteer,
    Role::User,
];

pub fn router() -> Router {
    Router::new()
        .route("/events", get(list).post(create))
        .route("/events/:id", axum::routing::put(update).delete(remove))
        .route("/events/:id/register", post(register_attendee))
}

fn parse_event_id(raw: &str) -> Result<EventId, axum::response::Response> {
    raw.parse::<EventId>()
        .map_err(|e| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string()))
}

/// POST /events — manager-only creation; the caller becomes the owner.
pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Json(draft): Json<EventDraft>,
) -> axum::response::Response {
    let identity = match services.authorize(&headers, &MANAGER_ONLY) {
        Ok(identity) => identity,
        Err(err) => return errors::auth_error_response(err),
    };

    match services.engine.create(&identity, draft) {
        Ok(outcome) => {
            let counter_lagged = outcome.counter_lagged();
            let event = match outcome {
                gatherly_events::CreateOutcome::Created(event) => event,
                gatherly_events::CreateOutcome::PartialSuccess { event, .. } => event,
            };
            (
                StatusCode::CREATED,
                Json(CreatedEventResponse {
                    event,
                    counter_lagged,
                }),
            )
                .into_response()
        }
        Err(err) => errors::engine_error_response(err),
    }
}

/// GET /events — public listing with optional category/date filters.
pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Query(filter): Query<EventFilter>,
) -> axum::response::Response {
    match services.engine.list(&filter) {
        Ok(events) => (StatusCode::OK, Json(events)).into_response(),
        Err(err) => errors::engine_error_response(err),
    }
}

/// PUT /events/:id — owner-only merge update.
pub async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(patch): Json<EventPatch>,
) -> axum::response::Response {
    let identity = match services.authorize(&headers, &MANAGER_ONLY) {
        Ok(identity) => identity,
        Err(err) => return errors::auth_error_response(err),
    };
    let id = match parse_event_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match services.engine.update(&identity, id, patch) {
        Ok(event) => (StatusCode::OK, Json(event)).into_response(),
        Err(err) => errors::engine_error_response(err),
    }
}

/// DELETE /events/:id — owner-only.
pub async fn remove(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> axum::response::Response {
    let identity = match services.authorize(&headers, &MANAGER_ONLY) {
        Ok(identity) => identity,
        Err(err) => return errors::auth_error_response(err),
    };
    let id = match parse_event_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match services.engine.delete(&identity, id) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "event deleted" })),
        )
            .into_response(),
        Err(err) => errors::engine_error_response(err),
    }
}

/// POST /events/:id/register — the caller registers itself, never a third
/// party.
pub async fn register_attendee(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> axum::response::Response {
    let identity = match services.authorize(&headers, &ATTENDEE_ROLES) {
        Ok(identity) => identity,
        Err(err) => return errors::auth_error_response(err),
    };
    let id = match parse_event_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match services.engine.register_attendee(&identity, id) {
        Ok(event) => (StatusCode::OK, Json(event)).into_response(),
        Err(err) => errors::engine_error_response(err),
    }
}
