//! Host error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use questboard_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the host process.
#[derive(Debug, Error)]
pub enum AppError {
    /// A configuration variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The board could not be loaded or saved.
    #[error("persistence error: {0}")]
    Persistence(#[from] DomainError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
///
/// User errors normally become reply text inside the router; this covers the
/// ones that surface at the request level, such as a failed host effect.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DomainError::NotRegistered(_) => (StatusCode::NOT_FOUND, "not_registered"),
            DomainError::QuestNotFound { .. } => (StatusCode::NOT_FOUND, "quest_not_found"),
            DomainError::NoActiveSession(_) => (StatusCode::NOT_FOUND, "no_active_session"),
            DomainError::AlreadyRegistered(_) => (StatusCode::CONFLICT, "already_registered"),
            DomainError::NotYourList { .. } | DomainError::NotPermitted(_) => {
                (StatusCode::FORBIDDEN, "forbidden")
            }
            DomainError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
            DomainError::IndexOutOfRange { .. }
            | DomainError::CannotAcceptOwnQuest(_)
            | DomainError::NoMatchingName(_)
            | DomainError::EmptyFeedback
            | DomainError::EmptyName
            | DomainError::UnexpectedInput(_)
            | DomainError::UnrecognizedInput(_)
            | DomainError::MalformedCallback(_) => (StatusCode::BAD_REQUEST, "validation_error"),
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use questboard_core::ids::{QuestId, UserId};

    use super::*;

    fn status_of(err: DomainError) -> StatusCode {
        let response = ApiError(err).into_response();
        response.status()
    }

    #[test]
    fn test_missing_things_map_to_404() {
        assert_eq!(
            status_of(DomainError::NotRegistered(UserId(1))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DomainError::QuestNotFound {
                owner: UserId(1),
                quest: QuestId(3),
            }),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_permission_errors_map_to_403() {
        assert_eq!(
            status_of(DomainError::NotPermitted(UserId(2))),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_bad_input_maps_to_400() {
        assert_eq!(
            status_of(DomainError::MalformedCallback("NOPE".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_infrastructure_maps_to_500() {
        assert_eq!(
            status_of(DomainError::Infrastructure("disk full".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
