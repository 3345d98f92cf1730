//! Feedback intake route handler.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use feedback_relay_core::{FeedbackForm, FeedbackSubmission};
use tracing::{info, instrument};

use crate::error::{ApiResponse, AppError, Result};
use crate::state::AppState;

/// Message returned when a notification was posted.
pub const SUCCESS_MESSAGE: &str = "Feedback submitted successfully!";

/// Submit feedback.
///
/// POST /api/submit-feedback
///
/// Validates the form, posts a notification to the feedback channel, and
/// returns the Slack timestamp of the new message.
#[instrument(skip(state, body))]
pub async fn submit_feedback(
    State(state): State<AppState>,
    body: std::result::Result<Json<FeedbackForm>, JsonRejection>,
) -> Result<Json<ApiResponse>> {
    let Json(form) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    let feedback = FeedbackSubmission::try_from(form)?;

    let handle = state.feedback().submit(&feedback).await?;

    info!(ts = %handle.ts, "Feedback submitted");

    Ok(Json(ApiResponse {
        success: true,
        message: SUCCESS_MESSAGE.to_string(),
        ts: Some(handle.ts),
    }))
}
