//! Service wiring for the HTTP layer.

use std::sync::Arc;

use axum::http::HeaderMap;

use gatherly_auth::{AuthError, Identity, Role, TokenService};
use gatherly_events::{EventEngine, InMemoryEventStore};
use gatherly_registry::{AccountRegistry, InMemoryAccountStore};

use crate::bearer::bearer_token;

/// Shared application services, injected into handlers as an extension.
pub struct AppServices {
    pub registry: Arc<AccountRegistry>,
    pub engine: Arc<EventEngine>,
    pub tokens: Arc<TokenService>,
}

impl AppServices {
    /// Gate a request: resolve the bearer token against the allow-list.
    pub fn authorize(&self, headers: &HeaderMap, allowed: &[Role]) -> Result<Identity, AuthError> {
        gatherly_auth::authorize(bearer_token(headers), allowed, &self.tokens)
    }
}

/// Wire the in-memory stores behind the registry and engine.
///
/// A production deployment would substitute document-store-backed
/// implementations of the two store ports here.
pub fn build_services(jwt_secret: &[u8]) -> AppServices {
    let accounts = Arc::new(InMemoryAccountStore::new());
    let events = Arc::new(InMemoryEventStore::new());

    let registry = Arc::new(AccountRegistry::new(accounts));
    let engine = Arc::new(EventEngine::new(events, Arc::clone(&registry)));
    let tokens = Arc::new(TokenService::new(jwt_secret));

    AppServices {
        registry,
        engine,
        tokens,
    }
}
