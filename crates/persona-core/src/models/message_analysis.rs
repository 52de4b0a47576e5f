use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Model-produced reading of a single chat message.
///
/// Every field defaults so partial model output still decodes. Labels
/// outside the known sets fail to decode, which callers treat like any
/// other unusable response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct MessageAnalysis {
    pub sentiment: Sentiment,
    pub emotions: Vec<EmotionScore>,
    pub topics: Vec<TopicScore>,
    pub urgency: Urgency,
    pub needs_followup: bool,
}

impl MessageAnalysis {
    /// The analysis stored when the model gives no usable answer.
    pub fn neutral() -> Self {
        Self {
            sentiment: Sentiment::default(),
            emotions: vec![EmotionScore {
                emotion: "neutral".to_string(),
                confidence: 0.5,
            }],
            topics: vec![TopicScore {
                topic: "general_conversation".to_string(),
                relevance: 0.7,
            }],
            urgency: Urgency::Low,
            needs_followup: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Sentiment {
    /// -1 (very negative) to 1 (very positive).
    pub score: f64,
    pub label: SentimentLabel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SentimentLabel {
    VeryPositive,
    Positive,
    #[default]
    Neutral,
    Negative,
    VeryNegative,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct EmotionScore {
    pub emotion: String,
    /// 0 to 1.
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct TopicScore {
    pub topic: String,
    /// 0 to 1.
    pub relevance: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Urgency {
    #[default]
    Low,
    Medium,
    High,
}
