//! Posted message identity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a message posted to a channel.
///
/// Slack identifies a message by the channel it lives in plus the `ts`
/// timestamp assigned when it was posted. Both are required to update it
/// later. The relay never stores handles; they are read back from the
/// interaction callback payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageHandle {
    /// Channel ID (e.g. `C0123456789`).
    pub channel_id: String,
    /// Message timestamp (e.g. `1718036400.123456`).
    pub ts: String,
}

impl MessageHandle {
    /// Create a handle from a channel ID and message timestamp.
    #[must_use]
    pub fn new(channel_id: impl Into<String>, ts: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            ts: ts.into(),
        }
    }
}

impl fmt::Display for MessageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.channel_id, self.ts)
    }
}
