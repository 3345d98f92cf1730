//! Slack Block Kit types for building rich messages.
//!
//! These types represent the subset of the Slack Block Kit specification
//! used by feedback notifications, plus the interaction payload Slack
//! delivers when a button is clicked.
//!
//! See: <https://api.slack.com/block-kit>

use feedback_relay_core::MessageHandle;
use serde::{Deserialize, Serialize};

/// Interaction type for button clicks in message blocks.
pub const BLOCK_ACTIONS: &str = "block_actions";

/// Block Kit block types.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Header block with large text.
    Header { text: PlainText },
    /// Section block with text.
    Section {
        text: Text,
        #[serde(skip_serializing_if = "Option::is_none")]
        block_id: Option<String>,
    },
    /// Context block with small muted text.
    Context {
        elements: Vec<ContextElement>,
        #[serde(skip_serializing_if = "Option::is_none")]
        block_id: Option<String>,
    },
    /// Actions block with interactive elements.
    Actions { elements: Vec<ActionElement> },
    /// Divider block (horizontal line).
    Divider,
}

impl Block {
    /// Create a markdown section block.
    #[must_use]
    pub fn section(text: impl Into<String>) -> Self {
        Self::Section {
            text: Text::mrkdwn(text),
            block_id: None,
        }
    }

    /// The Block Kit `type` tag of this block.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Header { .. } => "header",
            Self::Section { .. } => "section",
            Self::Context { .. } => "context",
            Self::Actions { .. } => "actions",
            Self::Divider => "divider",
        }
    }
}

/// Text object types.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Text {
    /// Plain text (no formatting).
    PlainText { text: String, emoji: bool },
    /// Markdown text (supports formatting).
    Mrkdwn { text: String },
}

impl Text {
    /// Create a markdown text object.
    #[must_use]
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self::Mrkdwn { text: text.into() }
    }

    /// The raw text content.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::PlainText { text, .. } | Self::Mrkdwn { text } => text,
        }
    }
}

/// Plain text object (for headers and button labels).
#[derive(Debug, Clone, Serialize)]
pub struct PlainText {
    #[serde(rename = "type")]
    pub text_type: &'static str,
    pub text: String,
    pub emoji: bool,
}

impl PlainText {
    /// Create a new plain text object.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text_type: "plain_text",
            text: text.into(),
            emoji: true,
        }
    }
}

/// Context block elements.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContextElement {
    /// Markdown text in context.
    Mrkdwn { text: String },
}

/// Action block elements.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionElement {
    /// Interactive button.
    Button {
        text: PlainText,
        action_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<ButtonStyle>,
    },
}

/// Button style (affects color).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    /// Green primary button.
    Primary,
}

// =============================================================================
// Blocks Read Back From Slack
// =============================================================================

/// A block as it appears on a message Slack sends back to us.
///
/// Slack echoes the original message in interaction payloads, decorated with
/// fields we never set (`block_id`s it generated, `verbatim` flags, and so
/// on). The block is kept as received so it can be written back unchanged;
/// only its kind and block ID are lifted out for inspection.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct ReceivedBlock {
    kind: String,
    block_id: Option<String>,
    raw: serde_json::Value,
}

impl ReceivedBlock {
    /// The Block Kit `type` tag (empty if the block had none).
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The block ID, if Slack reported one.
    #[must_use]
    pub fn block_id(&self) -> Option<&str> {
        self.block_id.as_deref()
    }

    /// The block exactly as received.
    #[must_use]
    pub const fn raw(&self) -> &serde_json::Value {
        &self.raw
    }
}

impl From<serde_json::Value> for ReceivedBlock {
    fn from(raw: serde_json::Value) -> Self {
        let field = |name: &str| {
            raw.get(name)
                .and_then(serde_json::Value::as_str)
                .map(String::from)
        };
        let kind = field("type").unwrap_or_default();
        let block_id = field("block_id");

        Self {
            kind,
            block_id,
            raw,
        }
    }
}

/// A block in an outgoing post or update.
///
/// Either a block built by this service or one carried over verbatim from
/// the message being updated.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageBlock {
    /// Block built by this service.
    Built(Block),
    /// Block carried over from the original message.
    Preserved(serde_json::Value),
}

impl MessageBlock {
    /// The Block Kit `type` tag of this block.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Built(block) => block.kind(),
            Self::Preserved(raw) => raw
                .get("type")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default(),
        }
    }
}

impl From<Block> for MessageBlock {
    fn from(block: Block) -> Self {
        Self::Built(block)
    }
}

impl From<ReceivedBlock> for MessageBlock {
    fn from(block: ReceivedBlock) -> Self {
        Self::Preserved(block.raw)
    }
}

// =============================================================================
// Request/Response Types
// =============================================================================

/// Body of a `chat.postMessage` call.
#[derive(Debug, Clone, Serialize)]
pub struct SlackMessage<'a> {
    /// Channel ID to post to.
    pub channel: &'a str,
    /// Message blocks.
    pub blocks: &'a [MessageBlock],
    /// Plain text fallback.
    pub text: &'a str,
}

/// Body of a `chat.update` call.
#[derive(Debug, Clone, Serialize)]
pub struct SlackUpdate<'a> {
    /// Channel ID of the message.
    pub channel: &'a str,
    /// Timestamp of the message to replace.
    pub ts: &'a str,
    /// Replacement blocks.
    pub blocks: &'a [MessageBlock],
    /// Replacement plain text fallback.
    pub text: &'a str,
}

/// Response from posting a message.
#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageResponse {
    /// Whether the request was successful.
    pub ok: bool,
    /// Channel ID where message was posted.
    #[serde(default)]
    pub channel: Option<String>,
    /// Message timestamp (unique ID).
    #[serde(default)]
    pub ts: Option<String>,
    /// Error message if not ok.
    #[serde(default)]
    pub error: Option<String>,
}

/// Response from updating a message.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMessageResponse {
    /// Whether the request was successful.
    pub ok: bool,
    /// Channel ID.
    #[serde(default)]
    pub channel: Option<String>,
    /// Updated message timestamp.
    #[serde(default)]
    pub ts: Option<String>,
    /// Error message if not ok.
    #[serde(default)]
    pub error: Option<String>,
}

// =============================================================================
// Interaction Payload
// =============================================================================

/// Slack interaction payload from button clicks.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionPayload {
    /// Type of interaction (e.g. `block_actions`).
    #[serde(rename = "type")]
    pub interaction_type: String,
    /// User who triggered the interaction.
    pub user: InteractionUser,
    /// Container information.
    #[serde(default)]
    pub container: Option<InteractionContainer>,
    /// Channel where interaction occurred.
    #[serde(default)]
    pub channel: Option<InteractionChannel>,
    /// The message carrying the clicked element.
    #[serde(default)]
    pub message: Option<InteractionMessage>,
    /// Actions that were triggered.
    #[serde(default)]
    pub actions: Vec<InteractionAction>,
}

impl InteractionPayload {
    /// Whether this is a button click in message blocks.
    #[must_use]
    pub fn is_block_actions(&self) -> bool {
        self.interaction_type == BLOCK_ACTIONS
    }

    /// Channel and timestamp of the message the interaction came from.
    ///
    /// Prefers the top-level channel and message, falling back to the
    /// container Slack attaches to every message interaction.
    #[must_use]
    pub fn message_handle(&self) -> Option<MessageHandle> {
        let container = self.container.as_ref();

        let channel_id = self
            .channel
            .as_ref()
            .map(|c| c.id.clone())
            .or_else(|| container.and_then(|c| c.channel_id.clone()))?;

        let ts = self
            .message
            .as_ref()
            .and_then(|m| m.ts.clone())
            .or_else(|| container.and_then(|c| c.message_ts.clone()))?;

        Some(MessageHandle::new(channel_id, ts))
    }

    /// Blocks of the original message, or `None` if Slack did not include
    /// the message.
    #[must_use]
    pub fn message_blocks(&self) -> Option<&[ReceivedBlock]> {
        self.message.as_ref().map(|m| m.blocks.as_slice())
    }
}

/// User who triggered an interaction.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionUser {
    /// Slack user ID.
    pub id: String,
    /// Username.
    #[serde(default)]
    pub username: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

impl InteractionUser {
    /// Best available human-readable name: name, then username, then ID.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or(&self.id)
    }
}

/// Container for the interaction.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionContainer {
    /// Container type (e.g., "message").
    #[serde(rename = "type")]
    pub container_type: String,
    /// Message timestamp.
    #[serde(default)]
    pub message_ts: Option<String>,
    /// Channel ID.
    #[serde(default)]
    pub channel_id: Option<String>,
}

/// Channel where interaction occurred.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionChannel {
    /// Channel ID.
    pub id: String,
    /// Channel name.
    #[serde(default)]
    pub name: Option<String>,
}

/// The message an interaction originated from.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionMessage {
    /// Message timestamp.
    #[serde(default)]
    pub ts: Option<String>,
    /// Fallback text.
    #[serde(default)]
    pub text: Option<String>,
    /// Message blocks as currently shown.
    #[serde(default)]
    pub blocks: Vec<ReceivedBlock>,
}

/// Action that was triggered.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionAction {
    /// Action ID (set when creating the button).
    pub action_id: String,
    /// Block ID containing this action.
    #[serde(default)]
    pub block_id: Option<String>,
    /// Value attached to the action.
    #[serde(default)]
    pub value: Option<String>,
    /// Action type.
    #[serde(rename = "type", default)]
    pub action_type: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_block_serialization_uses_type_tag() {
        let blocks = vec![
            Block::Header {
                text: PlainText::new("Title"),
            },
            Block::section("*bold*"),
            Block::Divider,
        ];

        let value = serde_json::to_value(&blocks).expect("serialize blocks");
        assert_eq!(
            value,
            json!([
                {"type": "header", "text": {"type": "plain_text", "text": "Title", "emoji": true}},
                {"type": "section", "text": {"type": "mrkdwn", "text": "*bold*"}},
                {"type": "divider"}
            ])
        );
    }

    #[test]
    fn test_received_block_keeps_unknown_fields() {
        let raw = json!({
            "type": "section",
            "block_id": "abc",
            "text": {"type": "mrkdwn", "text": "hi", "verbatim": false},
            "fields": [{"type": "mrkdwn", "text": "extra"}]
        });

        let block: ReceivedBlock = serde_json::from_value(raw.clone()).expect("parse block");
        assert_eq!(block.kind(), "section");
        assert_eq!(block.block_id(), Some("abc"));

        let out = serde_json::to_value(MessageBlock::from(block)).expect("serialize block");
        assert_eq!(out, raw);
    }

    #[test]
    fn test_received_block_without_type() {
        let block = ReceivedBlock::from(json!({"text": "odd"}));
        assert_eq!(block.kind(), "");
        assert_eq!(block.block_id(), None);
    }

    #[test]
    fn test_message_handle_prefers_channel_and_message() {
        let payload: InteractionPayload = serde_json::from_value(json!({
            "type": "block_actions",
            "user": {"id": "U1"},
            "container": {"type": "message", "message_ts": "1.1", "channel_id": "C-container"},
            "channel": {"id": "C-channel"},
            "message": {"ts": "2.2", "blocks": []},
            "actions": []
        }))
        .expect("parse payload");

        assert_eq!(
            payload.message_handle(),
            Some(MessageHandle::new("C-channel", "2.2"))
        );
    }

    #[test]
    fn test_message_handle_falls_back_to_container() {
        let payload: InteractionPayload = serde_json::from_value(json!({
            "type": "block_actions",
            "user": {"id": "U1"},
            "container": {"type": "message", "message_ts": "1.1", "channel_id": "C1"}
        }))
        .expect("parse payload");

        assert_eq!(payload.message_handle(), Some(MessageHandle::new("C1", "1.1")));
        assert!(payload.message_blocks().is_none());
        assert!(payload.actions.is_empty());
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut user = InteractionUser {
            id: "U1".to_string(),
            username: Some("ann".to_string()),
            name: Some("Ann Lee".to_string()),
        };
        assert_eq!(user.display_name(), "Ann Lee");

        user.name = None;
        assert_eq!(user.display_name(), "ann");

        user.username = None;
        assert_eq!(user.display_name(), "U1");
    }
}
