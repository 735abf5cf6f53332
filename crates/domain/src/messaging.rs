use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CollaboratorError;

/// A text message received in a group chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub group_id: String,
    pub sender_id: String,
    pub text: String,
}

impl InboundMessage {
    pub fn new(
        group_id: impl Into<String>,
        sender_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            sender_id: sender_id.into(),
            text: text.into(),
        }
    }
}

/// Outbound text plus the member ids the transport should mention
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    #[serde(default)]
    pub mentions: Vec<String>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mentions: Vec::new(),
        }
    }

    pub fn with_mentions(text: impl Into<String>, mentions: Vec<String>) -> Self {
        Self {
            text: text.into(),
            mentions,
        }
    }
}

/// Delivers replies back into a group chat
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReplySender: Send + Sync {
    async fn send_reply(&self, group_id: &str, reply: &Reply) -> Result<(), CollaboratorError>;
}
