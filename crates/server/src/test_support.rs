//! Recording stub for [`MessagingClient`] used by unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use feedback_relay_core::MessageHandle;

use crate::slack::{MessageBlock, MessagingClient, SlackError};

/// A captured post or update call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub channel: String,
    pub ts: String,
    pub text: String,
    pub blocks: Vec<serde_json::Value>,
}

/// Records every call and answers with canned results.
#[derive(Debug, Default)]
pub struct RecordingClient {
    posts: Mutex<Vec<RecordedCall>>,
    updates: Mutex<Vec<RecordedCall>>,
    fail_posts: bool,
    fail_updates: bool,
}

impl RecordingClient {
    pub fn failing_posts() -> Self {
        Self {
            fail_posts: true,
            ..Self::default()
        }
    }

    pub fn failing_updates() -> Self {
        Self {
            fail_updates: true,
            ..Self::default()
        }
    }

    pub fn posts(&self) -> Vec<RecordedCall> {
        self.posts.lock().expect("posts lock").clone()
    }

    pub fn updates(&self) -> Vec<RecordedCall> {
        self.updates.lock().expect("updates lock").clone()
    }
}

fn to_values(blocks: &[MessageBlock]) -> Vec<serde_json::Value> {
    blocks
        .iter()
        .map(|b| serde_json::to_value(b).expect("serialize block"))
        .collect()
}

#[async_trait]
impl MessagingClient for RecordingClient {
    async fn post_message(
        &self,
        channel: &str,
        fallback_text: &str,
        blocks: Vec<MessageBlock>,
    ) -> Result<MessageHandle, SlackError> {
        let mut posts = self.posts.lock().expect("posts lock");
        let ts = format!("1718036400.{:06}", posts.len() + 1);
        posts.push(RecordedCall {
            channel: channel.to_string(),
            ts: ts.clone(),
            text: fallback_text.to_string(),
            blocks: to_values(&blocks),
        });

        if self.fail_posts {
            return Err(SlackError::rejected("chat.postMessage", Some("channel_not_found".to_string())));
        }
        Ok(MessageHandle::new(channel, ts))
    }

    async fn update_message(
        &self,
        handle: &MessageHandle,
        fallback_text: &str,
        blocks: Vec<MessageBlock>,
    ) -> Result<(), SlackError> {
        self.updates.lock().expect("updates lock").push(RecordedCall {
            channel: handle.channel_id.clone(),
            ts: handle.ts.clone(),
            text: fallback_text.to_string(),
            blocks: to_values(&blocks),
        });

        if self.fail_updates {
            return Err(SlackError::rejected("chat.update", Some("message_not_found".to_string())));
        }
        Ok(())
    }
}
