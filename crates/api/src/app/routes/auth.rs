//! Registration and login.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use gatherly_registry::NewAccount;

use crate::app::dto::{LoginRequest, SessionResponse};
use crate::app::{errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// POST /auth/register — create an account and hand back a session token.
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewAccount>,
) -> axum::response::Response {
    let account = match services.registry.register(body) {
        Ok(account) => account,
        Err(err) => return errors::registry_error_response(err),
    };

    let token = match services.tokens.issue(account.id, account.role) {
        Ok(token) => token,
        Err(err) => return errors::auth_error_response(err),
    };

    (
        StatusCode::CREATED,
        Json(SessionResponse {
            account: account.view(),
            token,
        }),
    )
        .into_response()
}

/// POST /auth/login — authenticate and hand back a session token.
///
/// The response never distinguishes unknown email from wrong password.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<LoginRequest>,
) -> axum::response::Response {
    let account = match services.registry.authenticate(&body.email, &body.password) {
        Ok(account) => account,
        Err(err) => return errors::registry_error_response(err),
    };

    let token = match services.tokens.issue(account.id, account.role) {
        Ok(token) => token,
        Err(err) => return errors::auth_error_response(err),
    };

    (
        StatusCode::OK,
        Json(SessionResponse {
            account: account.view(),
            token,
        }),
    )
        .into_response()
}
