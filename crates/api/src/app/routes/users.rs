//! Admin account management.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use gatherly_auth::Role;
use gatherly_core::AccountId;
use gatherly_registry::{AccountPatch, NewAccount};

use crate::app::{errors, services::AppServices};

const ADMIN_ONLY: [Role; 1] = [Role::Admin];

pub fn router() -> Router {
    Router::new()
        .route("/users", get(list).post(create))
        .route("/users/:id", get(get_one).put(update).delete(remove))
}

fn parse_account_id(raw: &str) -> Result<AccountId, axum::response::Response> {
    raw.parse::<AccountId>()
        .map_err(|e| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string()))
}

/// POST /users — admin-created account (no session token issued).
pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Json(body): Json<NewAccount>,
) -> axum::response::Response {
    if let Err(err) = services.authorize(&headers, &ADMIN_ONLY) {
        return errors::auth_error_response(err);
    }

    match services.registry.register(body) {
        Ok(account) => (StatusCode::CREATED, Json(account.view())).into_response(),
        Err(err) => errors::registry_error_response(err),
    }
}

/// GET /users — list all accounts (sanitized).
pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> axum::response::Response {
    if let Err(err) = services.authorize(&headers, &ADMIN_ONLY) {
        return errors::auth_error_response(err);
    }

    match services.registry.list() {
        Ok(accounts) => {
            let views: Vec<_> = accounts.iter().map(|a| a.view()).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(err) => errors::registry_error_response(err),
    }
}

/// GET /users/:id
pub async fn get_one(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(err) = services.authorize(&headers, &ADMIN_ONLY) {
        return errors::auth_error_response(err);
    }
    let id = match parse_account_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match services.registry.get(id) {
        Ok(account) => (StatusCode::OK, Json(account.view())).into_response(),
        Err(err) => errors::registry_error_response(err),
    }
}

/// PUT /users/:id — merge a partial update.
pub async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(patch): Json<AccountPatch>,
) -> axum::response::Response {
    let identity = match services.authorize(&headers, &ADMIN_ONLY) {
        Ok(identity) => identity,
        Err(err) => return errors::auth_error_response(err),
    };
    let id = match parse_account_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match services.registry.update(&identity, id, patch) {
        Ok(account) => (StatusCode::OK, Json(account.view())).into_response(),
        Err(err) => errors::registry_error_response(err),
    }
}

/// DELETE /users/:id
pub async fn remove(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(err) = services.authorize(&headers, &ADMIN_ONLY) {
        return errors::auth_error_response(err);
    }
    let id = match parse_account_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match services.registry.delete(id) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "account deleted" })),
        )
            .into_response(),
        Err(err) => errors::registry_error_response(err),
    }
}
