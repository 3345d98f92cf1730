//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. Server-side errors are
//! captured to Sentry and logged in full before a generic JSON body is sent
//! to the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use feedback_relay_core::FeedbackError;
use serde::Serialize;
use thiserror::Error;

use crate::slack::SlackError;

/// Message returned to clients when Slack could not be reached.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to send feedback. Please try again later.";

/// Application-level error type for the relay.
#[derive(Debug, Error)]
pub enum AppError {
    /// Client-supplied data failed validation.
    #[error("{0}")]
    Validation(String),

    /// Slack API operation failed.
    #[error("Slack error: {0}")]
    Upstream(#[from] SlackError),

    /// Request could not be authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl From<FeedbackError> for AppError {
    fn from(err: FeedbackError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// JSON body shared by every feedback API response.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<String>,
}

impl ApiResponse {
    /// A failure body carrying `message`.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ts: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Upstream(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Validation(msg) => msg.clone(),
            Self::Unauthorized(_) => "Unauthorized".to_string(),
            Self::Upstream(_) => UPSTREAM_FAILURE_MESSAGE.to_string(),
        };

        (status, Json(ApiResponse::failure(message))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
