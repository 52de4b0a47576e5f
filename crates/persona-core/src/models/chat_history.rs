use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::message_analysis::MessageAnalysis;

/// A persisted conversation between a user and their twin.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Conversation {
    pub id: Uuid,
    pub user_id: String,
    pub messages: Vec<ChatHistoryMessage>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Conversation {
    pub fn new(user_id: &str) -> Self {
        let now = jiff::Timestamp::now();
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn push(&mut self, role: ChatHistoryRole, content: impl Into<String>) {
        self.push_analyzed(role, content, None);
    }

    /// Append a message together with its analysis, if one was made.
    pub fn push_analyzed(
        &mut self,
        role: ChatHistoryRole,
        content: impl Into<String>,
        analysis: Option<MessageAnalysis>,
    ) {
        let now = jiff::Timestamp::now();
        self.messages.push(ChatHistoryMessage {
            role,
            content: content.into(),
            timestamp: now,
            analysis,
        });
        self.updated_at = now;
    }
}

/// A single message in a persisted conversation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatHistoryMessage {
    pub role: ChatHistoryRole,
    pub content: String,
    pub timestamp: jiff::Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub analysis: Option<MessageAnalysis>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ChatHistoryRole {
    User,
    Assistant,
}
