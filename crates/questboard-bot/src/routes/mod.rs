//! Route modules.

pub mod health;
pub mod outbox;
pub mod updates;

use axum::Router;

use crate::state::AppState;

/// Every route the host serves, without middleware or state.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/v1", updates::router())
        .nest("/api/v1/outbox", outbox::router())
}
