//! Polling endpoint for queued notifications.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use questboard_core::ids::UserId;
use questboard_core::notification::Notification;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::state::AppState;

/// Response body for GET /{user_id}.
#[derive(Debug, Serialize)]
pub struct OutboxResponse {
    /// Whose outbox was drained.
    pub user_id: UserId,
    /// Queued notifications, oldest first.
    pub notifications: Vec<Notification>,
}

/// GET /{user_id}
#[instrument(skip(state))]
async fn drain_outbox(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Json<OutboxResponse> {
    let user_id = UserId(user_id);
    let notifications = state.notifier.drain(user_id);
    debug!(count = notifications.len(), "outbox drained");
    Json(OutboxResponse {
        user_id,
        notifications,
    })
}

/// Returns the outbox router.
pub fn router() -> Router<AppState> {
    Router::new().route("/{user_id}", get(drain_outbox))
}
