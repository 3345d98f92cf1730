//! Slack integration for feedback notifications.
//!
//! This module provides:
//! - [`MessagingClient`] and its Web API implementation, [`SlackClient`]
//! - Block Kit types for building rich messages
//! - Message builders for the notification and its acknowledged form
//! - Webhook signature verification
//!
//! # Flow
//!
//! 1. A feedback submission is posted to the channel with an Acknowledge button
//! 2. A teammate clicks Acknowledge
//! 3. The interaction webhook acknowledges Slack immediately
//! 4. The original message is rebuilt without its buttons and updated in place

mod client;
mod error;
mod messages;
mod signature;
mod types;

pub use client::{MessagingClient, SLACK_API_BASE, SlackClient};
pub use error::SlackError;
pub use messages::{
    ACK_ANNOUNCEMENT_BLOCK_ID, ACK_CONTEXT_BLOCK_ID, ACKNOWLEDGE_ACTION_ID, DEMO_ACTION_ID,
    EMAIL_PLACEHOLDER, FEEDBACK_HEADER, NotificationMessage, acknowledged_fallback_text,
    build_acknowledged_blocks, build_feedback_message, escape_mrkdwn,
};
pub use signature::{SIGNATURE_HEADER, SignatureVerifier, TIMESTAMP_HEADER};
pub use types::{
    ActionElement, BLOCK_ACTIONS, Block, ButtonStyle, ContextElement, InteractionAction,
    InteractionPayload, InteractionUser, MessageBlock, PlainText, ReceivedBlock, Text,
};
