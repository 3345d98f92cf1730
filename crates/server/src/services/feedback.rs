//! Feedback notification service.
//!
//! Formats a validated submission as a Block Kit notification and posts it
//! to the configured channel. Exactly one post per call; failures are
//! returned to the caller, never retried.

use std::sync::Arc;

use feedback_relay_core::{FeedbackSubmission, MessageHandle};
use tracing::{error, info, instrument};

use crate::slack::{MessagingClient, SlackError, build_feedback_message};

/// Posts feedback notifications to a channel.
#[derive(Clone)]
pub struct FeedbackService {
    slack: Arc<dyn MessagingClient>,
    channel: String,
}

impl FeedbackService {
    /// Create a feedback service posting to `channel`.
    #[must_use]
    pub fn new(slack: Arc<dyn MessagingClient>, channel: impl Into<String>) -> Self {
        Self {
            slack,
            channel: channel.into(),
        }
    }

    /// Post a notification for `feedback`.
    ///
    /// # Errors
    ///
    /// Returns error if the post request fails or Slack rejects it.
    #[instrument(skip(self, feedback), fields(channel = %self.channel, user = %feedback.user_name()))]
    pub async fn submit(&self, feedback: &FeedbackSubmission) -> Result<MessageHandle, SlackError> {
        let message = build_feedback_message(feedback);
        let blocks = message.blocks.into_iter().map(Into::into).collect();

        match self
            .slack
            .post_message(&self.channel, &message.fallback_text, blocks)
            .await
        {
            Ok(handle) => {
                info!(ts = %handle.ts, "Feedback notification posted");
                Ok(handle)
            }
            Err(e) => {
                error!(error = %e, "Failed to post feedback notification");
                Err(e)
            }
        }
    }
}
