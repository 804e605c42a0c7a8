use axum::Router;

pub mod auth;
pub mod events;
pub mod system;
pub mod users;

pub fn router() -> Router {
    Router::new()
        .merge(system::router())
        .merge(auth::router())
        .merge(users::router())
        .merge(events::router())
}
