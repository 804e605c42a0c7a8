//! HTTP application wiring (axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: wiring (stores, registry, engine, token service)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses
//!
//! Authorization is not a middleware layer: each handler calls the access
//! gate explicitly with its role allow-list before doing anything else.

use std::sync::Arc;

use axum::{Extension, Router};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(jwt_secret: &[u8]) -> Router {
    let services = Arc::new(services::build_services(jwt_secret));
    routes::router().layer(Extension(services))
}
