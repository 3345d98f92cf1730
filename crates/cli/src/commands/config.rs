//! Configuration check command.
//!
//! # Environment Variables
//!
//! - `SLACK_BOT_TOKEN` - Bot token used for posting (required)
//! - `SLACK_CHANNEL_ID` - Feedback channel (required, falls back to `SLACK_TEST_CHANNEL_ID`)
//! - `SLACK_SIGNING_SECRET` - Enables webhook signature checks (optional)

use feedback_relay_server::config::{ConfigError, RelayConfig};

/// Load the relay configuration and log a summary of it.
///
/// Secrets are reported as present or absent, never printed.
///
/// # Errors
///
/// Returns error if a required variable is missing or invalid.
pub fn check() -> Result<RelayConfig, ConfigError> {
    let config = RelayConfig::from_env()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  listen address: {}", config.socket_addr());
    tracing::info!("  bot token: loaded");
    tracing::info!("  channel: {}", config.slack.channel_id);
    tracing::info!("  api base: {}", config.slack.api_base);
    tracing::info!(
        "  signature checks: {}",
        if config.slack.signing_secret.is_some() {
            "enabled"
        } else {
            "disabled (SLACK_SIGNING_SECRET not set)"
        }
    );
    tracing::info!(
        "  sentry: {}",
        if config.sentry_dsn.is_some() {
            "enabled"
        } else {
            "disabled"
        }
    );

    Ok(config)
}
