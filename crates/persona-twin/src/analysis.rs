//! Per-message analysis for twin conversations.
//!
//! Asks the model for sentiment, emotions, topics and urgency of one user
//! message. Never fails: an unusable answer yields
//! [`MessageAnalysis::neutral`].

use persona_core::models::message_analysis::MessageAnalysis;
use tracing::{info, warn};

use crate::backend::{LlmBackend, LlmMessage};
use crate::error::TwinError;
use crate::narrative::extract_json_object;

const ANALYSIS_INSTRUCTIONS: &str = r#"Analyze the following message and return only a JSON object of this shape:
{
  "sentiment": {"score": -1 to 1, "label": "very_positive|positive|neutral|negative|very_negative"},
  "emotions": [{"emotion": "emotion_name", "confidence": 0 to 1}],
  "topics": [{"topic": "topic", "relevance": 0 to 1}],
  "urgency": "low|medium|high",
  "needs_followup": true or false
}"#;

pub fn build_analysis_prompt(message: &str) -> String {
    format!("{ANALYSIS_INSTRUCTIONS}\n\nMessage: \"{message}\"")
}

/// Analyze one user message, falling back to the neutral analysis when the
/// model call or its output fails.
pub async fn analyze_message(backend: &dyn LlmBackend, message: &str) -> MessageAnalysis {
    let messages = [LlmMessage::user(build_analysis_prompt(message))];
    let result = backend
        .complete(&messages)
        .await
        .and_then(|response| parse_message_analysis(&response));

    match result {
        Ok(analysis) => {
            info!(
                model_id = backend.model_id(),
                sentiment = ?analysis.sentiment.label,
                urgency = ?analysis.urgency,
                "message analyzed"
            );
            analysis
        }
        Err(e) => {
            warn!(error = %e, "message analysis failed, using neutral analysis");
            MessageAnalysis::neutral()
        }
    }
}

/// Decode a message analysis from model output, clamping scores into their
/// documented ranges.
pub fn parse_message_analysis(response: &str) -> Result<MessageAnalysis, TwinError> {
    let json = extract_json_object(response).ok_or_else(|| {
        TwinError::ResponseParse(format!("no JSON object in response: {response}"))
    })?;
    let mut analysis: MessageAnalysis = serde_json::from_str(json).map_err(|e| {
        TwinError::SchemaViolation(format!("failed to parse MessageAnalysis: {e}"))
    })?;

    analysis.sentiment.score = analysis.sentiment.score.clamp(-1.0, 1.0);
    for emotion in &mut analysis.emotions {
        emotion.confidence = emotion.confidence.clamp(0.0, 1.0);
    }
    for topic in &mut analysis.topics {
        topic.relevance = topic.relevance.clamp(0.0, 1.0);
    }
    Ok(analysis)
}
