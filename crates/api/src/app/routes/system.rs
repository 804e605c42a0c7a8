use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::{errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/whoami", get(whoami))
}

pub async fn health() -> axum::response::Response {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))).into_response()
}

/// Echo the identity resolved from the caller's token. Any authenticated
/// caller may ask.
pub async fn whoami(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> axum::response::Response {
    let identity = match services.authorize(&headers, &[]) {
        Ok(identity) => identity,
        Err(err) => return errors::auth_error_response(err),
    };

    (StatusCode::OK, Json(identity)).into_response()
}
