//! Slack smoke test command.

use feedback_relay_server::config::ConfigError;
use feedback_relay_server::slack::{SlackClient, SlackError};
use thiserror::Error;

/// Text posted when no `--text` is given.
pub const DEFAULT_TEST_TEXT: &str = "Hello from the feedback relay! This is a test message.";

/// Errors that can occur while sending a test message.
#[derive(Debug, Error)]
pub enum SendTestError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Slack rejected the message.
    #[error(transparent)]
    Slack(#[from] SlackError),
}

/// Post a plain text message using the configured bot token.
///
/// # Arguments
///
/// * `channel` - Channel ID, or `None` for the configured feedback channel
/// * `text` - Message text
///
/// # Errors
///
/// Returns error if configuration is missing or Slack rejects the post.
pub async fn send_test(channel: Option<&str>, text: &str) -> Result<(), SendTestError> {
    let config = super::config::check()?;
    let channel = channel.unwrap_or(config.slack.channel_id.as_str());

    let client = SlackClient::with_api_base(
        config.slack.bot_token.clone(),
        config.slack.api_base.clone(),
    );

    tracing::info!("Posting test message to {}...", channel);
    let handle = client.post_text(channel, text).await?;

    tracing::info!("Message sent successfully! ts: {}", handle.ts);

    Ok(())
}
