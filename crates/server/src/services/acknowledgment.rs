//! Acknowledgment service for feedback notifications.
//!
//! Runs after the interaction webhook has already answered Slack, so nothing
//! here can change the HTTP response. Every failure is logged and dropped:
//! a lost update is recovered by clicking Acknowledge again.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, instrument, warn};

use crate::slack::{
    ACKNOWLEDGE_ACTION_ID, InteractionPayload, MessagingClient, SlackError,
    acknowledged_fallback_text, build_acknowledged_blocks,
};

/// What processing an interaction did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    /// Not a block action, or no Acknowledge button among the actions.
    Ignored,
    /// One or more Acknowledge clicks were processed.
    Acknowledged {
        /// Messages updated successfully.
        updated: usize,
        /// Updates that could not be made.
        failed: usize,
    },
}

/// Decode an interaction webhook body (`payload=<url-encoded JSON>`).
///
/// # Errors
///
/// Returns [`SlackError::BadPayload`] if the body has no `payload`
/// field or the field is not a valid interaction payload.
pub fn parse_interaction_body(body: &str) -> Result<InteractionPayload, SlackError> {
    let payload = url::form_urlencoded::parse(body.as_bytes())
        .find(|(key, _)| key == "payload")
        .map(|(_, value)| value)
        .ok_or_else(|| SlackError::BadPayload("Missing payload field".into()))?;

    serde_json::from_str(&payload).map_err(|e| SlackError::BadPayload(e.to_string()))
}

/// Rewrites acknowledged notifications in place.
#[derive(Clone)]
pub struct AcknowledgmentService {
    slack: Arc<dyn MessagingClient>,
}

impl AcknowledgmentService {
    /// Create a new acknowledgment service.
    #[must_use]
    pub fn new(slack: Arc<dyn MessagingClient>) -> Self {
        Self { slack }
    }

    /// Decode and process a raw webhook body, logging any failure.
    pub async fn handle_body(&self, body: &str) -> Option<InteractionOutcome> {
        match parse_interaction_body(body) {
            Ok(payload) => Some(self.process(&payload).await),
            Err(e) => {
                error!(error = %e, "Dropping unparseable Slack interaction");
                None
            }
        }
    }

    /// Process an interaction payload.
    ///
    /// Each Acknowledge action in a block action interaction rebuilds the
    /// message it came from and updates it in place.
    #[instrument(skip(self, payload), fields(user = %payload.user.id, kind = %payload.interaction_type))]
    pub async fn process(&self, payload: &InteractionPayload) -> InteractionOutcome {
        if !payload.is_block_actions() {
            debug!("Ignoring non block_actions interaction");
            return InteractionOutcome::Ignored;
        }

        let clicks = payload
            .actions
            .iter()
            .filter(|action| action.action_id == ACKNOWLEDGE_ACTION_ID)
            .count();

        if clicks == 0 {
            debug!(
                actions = ?payload.actions.iter().map(|a| a.action_id.as_str()).collect::<Vec<_>>(),
                "No acknowledge action in interaction"
            );
            return InteractionOutcome::Ignored;
        }

        let Some(handle) = payload.message_handle() else {
            warn!("Acknowledge interaction without channel or message timestamp");
            return InteractionOutcome::Acknowledged {
                updated: 0,
                failed: clicks,
            };
        };

        // Without the original blocks a rebuild would erase the feedback
        let Some(original) = payload.message_blocks() else {
            warn!(handle = %handle, "Acknowledge interaction without original message");
            return InteractionOutcome::Acknowledged {
                updated: 0,
                failed: clicks,
            };
        };

        let user_name = payload.user.display_name();
        let mut updated = 0;
        let mut failed = 0;

        for _ in 0..clicks {
            info!(handle = %handle, user = %user_name, "Processing acknowledgment");

            let blocks = build_acknowledged_blocks(original, user_name, Utc::now());
            let text = acknowledged_fallback_text(user_name);

            match self.slack.update_message(&handle, &text, blocks).await {
                Ok(()) => {
                    debug!(handle = %handle, "Feedback marked as acknowledged");
                    updated += 1;
                }
                Err(e) => {
                    error!(handle = %handle, error = %e, "Failed to update acknowledged message");
                    failed += 1;
                }
            }
        }

        InteractionOutcome::Acknowledged { updated, failed }
    }
}
