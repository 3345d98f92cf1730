//! Slack message builders for the feedback acknowledgment flow.
//!
//! Provides factory functions for building Block Kit messages for:
//! - New feedback notifications (with Acknowledge button)
//! - Acknowledged notifications (rebuilt from the original message)

use chrono::{DateTime, Utc};
use feedback_relay_core::FeedbackSubmission;

use super::types::{
    ActionElement, Block, ButtonStyle, ContextElement, MessageBlock, PlainText, ReceivedBlock, Text,
};

/// Action ID of the Acknowledge button.
pub const ACKNOWLEDGE_ACTION_ID: &str = "acknowledge_feedback_button";

/// Action ID of the demo button.
pub const DEMO_ACTION_ID: &str = "demo_button_click";

/// Title of the notification header.
pub const FEEDBACK_HEADER: &str = "New Feedback Received";

/// Shown in place of a missing email address.
pub const EMAIL_PLACEHOLDER: &str = "Not provided";

/// Block ID of the "acknowledged by" section.
pub const ACK_ANNOUNCEMENT_BLOCK_ID: &str = "feedback_ack_announcement";

/// Block ID of the "acknowledged at" context.
pub const ACK_CONTEXT_BLOCK_ID: &str = "feedback_ack_context";

/// Characters of the feedback message included in the fallback text.
const FALLBACK_PREVIEW_CHARS: usize = 50;

/// A formatted feedback notification, ready to post.
#[derive(Debug, Clone)]
pub struct NotificationMessage {
    /// Plain text shown by clients that cannot render blocks.
    pub fallback_text: String,
    /// Message blocks.
    pub blocks: Vec<Block>,
}

/// Build the notification for a new feedback submission.
///
/// The message includes:
/// - Header
/// - Name, email, and message
/// - Divider
/// - Demo and Acknowledge buttons
#[must_use]
pub fn build_feedback_message(feedback: &FeedbackSubmission) -> NotificationMessage {
    let name = escape_mrkdwn(feedback.user_name());
    let email = feedback
        .user_email()
        .map_or_else(|| EMAIL_PLACEHOLDER.to_string(), escape_mrkdwn);
    let message = escape_mrkdwn(feedback.user_message());

    let blocks = vec![
        Block::Header {
            text: PlainText::new(FEEDBACK_HEADER),
        },
        Block::section(format!(
            "*From:* {name}\n*Email:* {email}\n*Message:*\n{message}"
        )),
        Block::Divider,
        Block::Actions {
            elements: vec![
                ActionElement::Button {
                    text: PlainText::new("Click Me"),
                    action_id: DEMO_ACTION_ID.to_string(),
                    value: Some("click_me_123".to_string()),
                    style: Some(ButtonStyle::Primary),
                },
                ActionElement::Button {
                    text: PlainText::new("Acknowledge"),
                    action_id: ACKNOWLEDGE_ACTION_ID.to_string(),
                    value: Some(acknowledge_value(feedback.user_name())),
                    style: Some(ButtonStyle::Primary),
                },
            ],
        },
    ];

    NotificationMessage {
        fallback_text: feedback_fallback_text(feedback),
        blocks,
    }
}

/// Rebuild a notification in its acknowledged state.
///
/// The result is:
/// 1. A section announcing who acknowledged the feedback
/// 2. The original header, if there was one
/// 3. Every other original block, minus action blocks and the output of any
///    earlier acknowledgment
/// 4. A context block stamped with `acknowledged_at`
///
/// Running this again on an already acknowledged message replaces the
/// previous announcement rather than stacking a second one.
#[must_use]
pub fn build_acknowledged_blocks(
    original: &[ReceivedBlock],
    acknowledged_by: &str,
    acknowledged_at: DateTime<Utc>,
) -> Vec<MessageBlock> {
    let mut blocks: Vec<MessageBlock> = Vec::with_capacity(original.len() + 2);

    blocks.push(
        Block::Section {
            text: Text::mrkdwn(format!(
                ":white_check_mark: *{}* acknowledged this feedback",
                escape_mrkdwn(acknowledged_by)
            )),
            block_id: Some(ACK_ANNOUNCEMENT_BLOCK_ID.to_string()),
        }
        .into(),
    );

    if let Some(header) = original.iter().find(|b| b.kind() == "header") {
        blocks.push(header.clone().into());
    }

    blocks.extend(
        original
            .iter()
            .filter(|b| !matches!(b.kind(), "header" | "actions"))
            .filter(|b| {
                !matches!(
                    b.block_id(),
                    Some(ACK_ANNOUNCEMENT_BLOCK_ID | ACK_CONTEXT_BLOCK_ID)
                )
            })
            .cloned()
            .map(MessageBlock::from),
    );

    blocks.push(
        Block::Context {
            elements: vec![ContextElement::Mrkdwn {
                text: format!(
                    "Acknowledged at {}",
                    acknowledged_at.format("%Y-%m-%d %H:%M:%S UTC")
                ),
            }],
            block_id: Some(ACK_CONTEXT_BLOCK_ID.to_string()),
        }
        .into(),
    );

    blocks
}

/// Fallback text for an acknowledged notification.
#[must_use]
pub fn acknowledged_fallback_text(acknowledged_by: &str) -> String {
    format!("Feedback acknowledged by {}", escape_mrkdwn(acknowledged_by))
}

/// Fallback text for a new notification: the name and a message preview.
fn feedback_fallback_text(feedback: &FeedbackSubmission) -> String {
    let preview: String = feedback
        .user_message()
        .chars()
        .take(FALLBACK_PREVIEW_CHARS)
        .collect();

    format!(
        "New Feedback from {}: {}...",
        escape_mrkdwn(feedback.user_name()),
        escape_mrkdwn(&preview)
    )
}

/// Acknowledge button value: the submitter's name with whitespace runs
/// replaced by underscores. For humans reading the payload, never parsed.
fn acknowledge_value(user_name: &str) -> String {
    format!("ack_{}", user_name.split_whitespace().collect::<Vec<_>>().join("_"))
}

/// Escape the characters Slack reserves for control sequences in text.
///
/// See: <https://api.slack.com/reference/surfaces/formatting#escaping>
#[must_use]
pub fn escape_mrkdwn(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn feedback(name: &str, email: Option<&str>, message: &str) -> FeedbackSubmission {
        FeedbackSubmission::new(Some(name), email, Some(message)).expect("valid feedback")
    }

    fn section_text(block: &Block) -> &str {
        match block {
            Block::Section { text, .. } => text.as_str(),
            other => panic!("Expected Section block, got {other:?}"),
        }
    }

    #[test]
    fn test_feedback_message_structure() {
        let message = build_feedback_message(&feedback("Ann Lee", Some("a@x.com"), "Great job"));
        let kinds: Vec<&str> = message.blocks.iter().map(Block::kind).collect();

        assert_eq!(kinds, ["header", "section", "divider", "actions"]);

        match message.blocks.get(3) {
            Some(Block::Actions { elements }) => assert_eq!(elements.len(), 2),
            other => panic!("Expected Actions block, got {other:?}"),
        }
    }

    #[test]
    fn test_feedback_message_section_contains_fields_verbatim() {
        let message = build_feedback_message(&feedback("Ann Lee", Some("a@x.com"), "Great job"));
        let text = section_text(message.blocks.get(1).expect("section block"));

        assert!(text.contains("Ann Lee"));
        assert!(text.contains("a@x.com"));
        assert!(text.contains("Great job"));
    }

    #[test]
    fn test_missing_email_uses_placeholder() {
        let message = build_feedback_message(&feedback("Ann", None, "hi"));
        let text = section_text(message.blocks.get(1).expect("section block"));

        assert!(text.contains("*Email:* Not provided"));
    }

    #[test]
    fn test_fallback_text() {
        let message = build_feedback_message(&feedback("Ann Lee", Some("a@x.com"), "Great job"));
        assert_eq!(message.fallback_text, "New Feedback from Ann Lee: Great job...");
    }

    #[test]
    fn test_fallback_text_truncates_to_fifty_chars() {
        let long = "é".repeat(80);
        let message = build_feedback_message(&feedback("Ann", None, &long));

        let expected = format!("New Feedback from Ann: {}...", "é".repeat(50));
        assert_eq!(message.fallback_text, expected);
    }

    #[test]
    fn test_acknowledge_button() {
        let message = build_feedback_message(&feedback("Ann  Marie Lee", None, "hi"));
        let Some(Block::Actions { elements }) = message.blocks.last() else {
            panic!("Expected Actions block last");
        };

        let ActionElement::Button {
            action_id, value, ..
        } = elements.get(1).expect("two buttons");
        assert_eq!(action_id, ACKNOWLEDGE_ACTION_ID);
        assert_eq!(value.as_deref(), Some("ack_Ann_Marie_Lee"));
    }

    #[test]
    fn test_escapes_slack_control_characters() {
        let message = build_feedback_message(&feedback(
            "<!channel>",
            Some("a&b@x.com"),
            "see <http://evil|here>",
        ));
        let text = section_text(message.blocks.get(1).expect("section block"));

        assert!(text.contains("&lt;!channel&gt;"));
        assert!(text.contains("a&amp;b@x.com"));
        assert!(text.contains("see &lt;http://evil|here&gt;"));
        assert!(!text.contains('<'));
    }

    fn original_blocks() -> Vec<ReceivedBlock> {
        let message = build_feedback_message(&feedback("Ann Lee", Some("a@x.com"), "Great job"));
        let value = serde_json::to_value(&message.blocks).expect("serialize");
        serde_json::from_value(value).expect("parse blocks")
    }

    fn at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-10T16:20:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc)
    }

    #[test]
    fn test_acknowledged_blocks_layout() {
        let blocks = build_acknowledged_blocks(&original_blocks(), "Bob", at());
        let kinds: Vec<&str> = blocks.iter().map(MessageBlock::kind).collect();

        assert_eq!(kinds, ["section", "header", "section", "divider", "context"]);

        let value = serde_json::to_value(&blocks).expect("serialize");
        assert_eq!(value[0]["block_id"], ACK_ANNOUNCEMENT_BLOCK_ID);
        assert!(
            value[0]["text"]["text"]
                .as_str()
                .is_some_and(|t| t.contains("*Bob* acknowledged this feedback"))
        );
        assert_eq!(value[1]["text"]["text"], FEEDBACK_HEADER);
        assert_eq!(
            value[4]["elements"][0]["text"],
            "Acknowledged at 2024-06-10 16:20:00 UTC"
        );
    }

    #[test]
    fn test_acknowledged_blocks_without_header() {
        let original: Vec<ReceivedBlock> = vec![
            json!({"type": "section", "text": {"type": "mrkdwn", "text": "body"}}).into(),
            json!({"type": "actions", "elements": []}).into(),
        ];

        let blocks = build_acknowledged_blocks(&original, "Bob", at());
        let kinds: Vec<&str> = blocks.iter().map(MessageBlock::kind).collect();

        assert_eq!(kinds, ["section", "section", "context"]);
    }

    #[test]
    fn test_reacknowledging_replaces_previous_announcement() {
        let first = build_acknowledged_blocks(&original_blocks(), "Bob", at());
        let echoed: Vec<ReceivedBlock> =
            serde_json::from_value(serde_json::to_value(&first).expect("serialize"))
                .expect("parse blocks");

        let second = build_acknowledged_blocks(&echoed, "Carol", at());
        let value = serde_json::to_value(&second).expect("serialize");
        let rendered = value.to_string();

        assert_eq!(second.len(), first.len());
        assert!(rendered.contains("*Carol* acknowledged"));
        assert!(!rendered.contains("*Bob* acknowledged"));
        assert_eq!(
            second.iter().filter(|b| b.kind() == "header").count(),
            1
        );
        assert_eq!(
            second.iter().filter(|b| b.kind() == "context").count(),
            1
        );
    }

    #[test]
    fn test_preserves_unknown_blocks_verbatim() {
        let image = json!({"type": "image", "image_url": "https://x/y.png", "alt_text": "y"});
        let original: Vec<ReceivedBlock> = vec![image.clone().into()];

        let blocks = build_acknowledged_blocks(&original, "Bob", at());
        let value = serde_json::to_value(&blocks).expect("serialize");

        assert_eq!(value[1], image);
    }

    #[test]
    fn test_acknowledged_fallback_text() {
        assert_eq!(
            acknowledged_fallback_text("Bob"),
            "Feedback acknowledged by Bob"
        );
    }

    #[test]
    fn test_escape_mrkdwn_leaves_plain_text() {
        assert_eq!(escape_mrkdwn("Great job! *bold* _it_"), "Great job! *bold* _it_");
        assert_eq!(escape_mrkdwn("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    }
}
