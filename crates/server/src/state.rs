//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::RelayConfig;
use crate::services::{AcknowledgmentService, FeedbackService};
use crate::slack::{MessagingClient, SignatureVerifier, SlackClient};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The messaging client is
/// built once at startup and shared by both the intake and interaction
/// handlers; nothing else is shared between requests.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    feedback: FeedbackService,
    acknowledgment: AcknowledgmentService,
    verifier: Option<SignatureVerifier>,
}

impl AppState {
    /// Create application state backed by the Slack Web API.
    #[must_use]
    pub fn new(config: &RelayConfig) -> Self {
        let slack = SlackClient::with_api_base(
            config.slack.bot_token.clone(),
            config.slack.api_base.clone(),
        );
        Self::with_client(config, Arc::new(slack))
    }

    /// Create application state backed by any messaging client.
    #[must_use]
    pub fn with_client(config: &RelayConfig, slack: Arc<dyn MessagingClient>) -> Self {
        let feedback = FeedbackService::new(Arc::clone(&slack), config.slack.channel_id.clone());
        let acknowledgment = AcknowledgmentService::new(slack);
        let verifier = config
            .slack
            .signing_secret
            .clone()
            .map(SignatureVerifier::new);

        Self {
            inner: Arc::new(AppStateInner {
                feedback,
                acknowledgment,
                verifier,
            }),
        }
    }

    /// Get the feedback notification service.
    #[must_use]
    pub fn feedback(&self) -> &FeedbackService {
        &self.inner.feedback
    }

    /// Get the acknowledgment service.
    #[must_use]
    pub fn acknowledgment(&self) -> &AcknowledgmentService {
        &self.inner.acknowledgment
    }

    /// Get the webhook signature verifier, if a signing secret is configured.
    #[must_use]
    pub fn verifier(&self) -> Option<&SignatureVerifier> {
        self.inner.verifier.as_ref()
    }
}
