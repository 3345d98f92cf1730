//! Errors from talking to Slack or reading what Slack sent us.

use thiserror::Error;

/// Failures of the Web API calls and of webhook intake.
#[derive(Debug, Error)]
pub enum SlackError {
    /// The Web API could not be reached.
    #[error("Could not reach Slack: {0}")]
    Transport(String),

    /// The Web API answered with something other than its JSON envelope.
    #[error("Unexpected Slack response: {0}")]
    MalformedResponse(String),

    /// The Web API answered `ok: false`.
    #[error("Slack {method} failed: {code}")]
    Rejected {
        /// Web API method, e.g. `chat.update`.
        method: &'static str,
        /// Slack's error code, e.g. `channel_not_found`.
        code: String,
    },

    /// A webhook request failed signature verification.
    #[error("Webhook signature rejected: {0}")]
    BadSignature(String),

    /// A webhook body did not hold a readable interaction payload.
    #[error("Unreadable interaction payload: {0}")]
    BadPayload(String),
}

impl SlackError {
    /// `ok: false` from `method`, with Slack's error code if it sent one.
    #[must_use]
    pub fn rejected(method: &'static str, code: Option<String>) -> Self {
        Self::Rejected {
            method,
            code: code.unwrap_or_else(|| "unknown_error".to_string()),
        }
    }
}
