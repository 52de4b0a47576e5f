use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::quiz_result::QuizResult;

/// Persona the twin adopts when replying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ConversationStyle {
    #[default]
    Supportive,
    Analytical,
    Motivational,
    Gentle,
}

/// What the twin knows about a user, refreshed on every quiz submission.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserProfile {
    pub user_id: String,
    pub name: Option<String>,
    pub conversation_style: ConversationStyle,
    pub personality_type: Option<String>,
    pub dominant_traits: Vec<String>,
    pub updated_at: jiff::Timestamp,
}

impl UserProfile {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            name: None,
            conversation_style: ConversationStyle::default(),
            personality_type: None,
            dominant_traits: Vec::new(),
            updated_at: jiff::Timestamp::now(),
        }
    }

    /// Fold a freshly stored result into the profile.
    pub fn apply_result(&mut self, result: &QuizResult) {
        self.personality_type = Some(result.results.overall_style.name.clone());
        self.dominant_traits = result.results.traits.iter().map(|t| t.name.clone()).collect();
        self.conversation_style = ConversationStyle::Gentle;
        self.updated_at = jiff::Timestamp::now();
    }
}
