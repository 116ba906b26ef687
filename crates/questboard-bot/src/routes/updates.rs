//! Inbound chat updates: typed messages and button presses.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use questboard_core::error::DomainError;
use questboard_router::action::{Action, Actor};
use questboard_router::command::{parse_callback, parse_command};
use questboard_router::messages;
use questboard_router::outcome::{Outcome, Reply};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /messages.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    /// Who sent the message.
    pub actor: Actor,
    /// Message text; commands start with `/`.
    pub text: String,
}

/// Request body for POST /callbacks.
#[derive(Debug, Deserialize)]
pub struct CallbackRequest {
    /// Who pressed the button.
    pub actor: Actor,
    /// The button's callback token.
    pub data: String,
}

/// Response body for a handled update.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    /// What to show the actor.
    pub reply: Reply,
    /// Notifications queued for other participants.
    pub notified: usize,
    /// Notifications that could not be queued.
    pub undelivered: usize,
}

/// POST /messages
#[instrument(skip(state, request), fields(actor = %request.actor.id))]
async fn post_message(
    State(state): State<AppState>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let action = parse_command(&request.text);
    handle_update(&state, &request.actor, action).await
}

/// POST /callbacks
#[instrument(skip(state, request), fields(actor = %request.actor.id))]
async fn post_callback(
    State(state): State<AppState>,
    Json(request): Json<CallbackRequest>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let action = parse_callback(&request.data);
    handle_update(&state, &request.actor, action).await
}

async fn handle_update(
    state: &AppState,
    actor: &Actor,
    action: Result<Action, DomainError>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let outcome = match action {
        Ok(action) => state.engine.lock().await.handle(actor, action),
        Err(e) => {
            warn!(error = %e, "update rejected before routing");
            Outcome::reply(Reply::new(messages::describe(&e)))
        }
    };

    let report = state.settle(&outcome).await?;

    Ok(Json(UpdateResponse {
        reply: outcome.reply,
        notified: report.delivered,
        undelivered: report.failed,
    }))
}

/// Returns the update router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages", post(post_message))
        .route("/callbacks", post(post_callback))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use questboard_core::ids::UserId;
    use tower::ServiceExt;

    use super::*;
    use crate::state::testing::test_state;

    async fn send(state: &AppState, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let app = router().with_state(state.clone());
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_register_command_returns_reply() {
        // Arrange
        let (state, _dir) = test_state();

        // Act
        let (status, body) = send(
            &state,
            "/messages",
            serde_json::json!({"actor": {"id": 7, "name": "Ada"}, "text": "/am"}),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"]["text"], messages::REGISTERED);
        assert_eq!(body["reply"]["mode"], "new");
        assert!(state.engine.lock().await.board().user_exists(UserId(7)));
    }

    #[tokio::test]
    async fn test_unknown_command_is_described_not_failed() {
        let (state, _dir) = test_state();

        let (status, body) = send(
            &state,
            "/messages",
            serde_json::json!({"actor": {"id": 7}, "text": "/dance"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"]["text"], "I don't know /dance. Try /help.");
    }

    #[tokio::test]
    async fn test_malformed_callback_is_described() {
        let (state, _dir) = test_state();

        let (status, body) = send(
            &state,
            "/callbacks",
            serde_json::json!({"actor": {"id": 7}, "data": "TOGGLE,x"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["reply"]["text"],
            messages::describe(&DomainError::MalformedCallback("TOGGLE,x".into()))
        );
    }

    #[tokio::test]
    async fn test_feedback_is_appended_to_log() {
        // Arrange
        let (state, _dir) = test_state();

        // Act
        let (status, body) = send(
            &state,
            "/messages",
            serde_json::json!({"actor": {"id": 7, "name": "Ada"}, "text": "/feedback more dragons"}),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"]["text"], messages::FEEDBACK_RECORDED);
        let log = std::fs::read_to_string(state.feedback.path()).unwrap();
        assert!(log.starts_with("7 ("));
        assert!(log.ends_with("more dragons\n\n"));
    }

    #[tokio::test]
    async fn test_missing_actor_is_client_error() {
        let (state, _dir) = test_state();
        let app = router().with_state(state);
        let request = Request::builder()
            .method("POST")
            .uri("/messages")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"text": "/help"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert!(response.status().is_client_error());
    }
}
