//! Slack Web API client.
//!
//! Provides the [`MessagingClient`] capability (post and update messages)
//! and its production implementation, [`SlackClient`].

use async_trait::async_trait;
use feedback_relay_core::MessageHandle;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, instrument};

use super::error::SlackError;
use super::types::{
    Block, MessageBlock, PostMessageResponse, SlackMessage, SlackUpdate, UpdateMessageResponse,
};

/// Slack Web API base URL.
pub const SLACK_API_BASE: &str = "https://slack.com/api";

/// Posting and updating channel messages.
///
/// Handlers depend on this trait rather than on [`SlackClient`] so tests can
/// substitute a recording stub.
#[async_trait]
pub trait MessagingClient: Send + Sync {
    /// Post a message to a channel, returning the identity Slack assigned it.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or Slack returns an error.
    async fn post_message(
        &self,
        channel: &str,
        fallback_text: &str,
        blocks: Vec<MessageBlock>,
    ) -> Result<MessageHandle, SlackError>;

    /// Replace the content of a previously posted message.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or Slack returns an error.
    async fn update_message(
        &self,
        handle: &MessageHandle,
        fallback_text: &str,
        blocks: Vec<MessageBlock>,
    ) -> Result<(), SlackError>;
}

/// Slack API client for sending and updating messages.
#[derive(Clone)]
pub struct SlackClient {
    /// HTTP client.
    client: Client,
    /// Bot token for authentication.
    bot_token: SecretString,
    /// Web API base URL (overridable for proxies and tests).
    api_base: String,
}

impl std::fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClient")
            .field("bot_token", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl SlackClient {
    /// Create a new Slack client against the public Web API.
    #[must_use]
    pub fn new(bot_token: SecretString) -> Self {
        Self::with_api_base(bot_token, SLACK_API_BASE)
    }

    /// Create a new Slack client against a custom Web API base URL.
    #[must_use]
    pub fn with_api_base(bot_token: SecretString, api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            bot_token,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Get the Web API base URL.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.api_base)
    }

    /// Post a simple text message (convenience method).
    ///
    /// # Errors
    ///
    /// Returns error if posting fails.
    pub async fn post_text(&self, channel: &str, text: &str) -> Result<MessageHandle, SlackError> {
        let blocks = vec![Block::section(text).into()];

        self.post_message(channel, text, blocks).await
    }
}

#[async_trait]
impl MessagingClient for SlackClient {
    #[instrument(skip(self, fallback_text, blocks), fields(channel = %channel))]
    async fn post_message(
        &self,
        channel: &str,
        fallback_text: &str,
        blocks: Vec<MessageBlock>,
    ) -> Result<MessageHandle, SlackError> {
        let message = SlackMessage {
            channel,
            blocks: &blocks,
            text: fallback_text,
        };

        let response = self
            .client
            .post(self.method_url("chat.postMessage"))
            .bearer_auth(self.bot_token.expose_secret())
            .json(&message)
            .send()
            .await
            .map_err(|e| SlackError::Transport(e.to_string()))?;

        let result: PostMessageResponse = response
            .json()
            .await
            .map_err(|e| SlackError::MalformedResponse(e.to_string()))?;

        if !result.ok {
            error!(
                error = ?result.error,
                "Slack API error posting message"
            );
            return Err(SlackError::rejected("chat.postMessage", result.error));
        }

        let ts = result
            .ts
            .ok_or_else(|| SlackError::MalformedResponse("Missing ts in postMessage response".into()))?;
        let channel_id = result.channel.unwrap_or_else(|| channel.to_string());

        debug!(ts = %ts, channel = %channel_id, "Message posted to Slack");

        Ok(MessageHandle::new(channel_id, ts))
    }

    #[instrument(skip(self, fallback_text, blocks), fields(handle = %handle))]
    async fn update_message(
        &self,
        handle: &MessageHandle,
        fallback_text: &str,
        blocks: Vec<MessageBlock>,
    ) -> Result<(), SlackError> {
        let message = SlackUpdate {
            channel: &handle.channel_id,
            ts: &handle.ts,
            blocks: &blocks,
            text: fallback_text,
        };

        let response = self
            .client
            .post(self.method_url("chat.update"))
            .bearer_auth(self.bot_token.expose_secret())
            .json(&message)
            .send()
            .await
            .map_err(|e| SlackError::Transport(e.to_string()))?;

        let result: UpdateMessageResponse = response
            .json()
            .await
            .map_err(|e| SlackError::MalformedResponse(e.to_string()))?;

        if !result.ok {
            error!(
                error = ?result.error,
                "Slack API error updating message"
            );
            return Err(SlackError::rejected("chat.update", result.error));
        }

        debug!(ts = %handle.ts, "Message updated in Slack");

        Ok(())
    }
}
