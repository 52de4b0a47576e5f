//! Narrative enrichment of quiz results.
//!
//! Sends the submitted answers (and the previous scores, when there are
//! any) to the model and asks for a `NarrativeAnalysis` as JSON. The caller
//! decides what to do on failure; enrichment is always optional.

use persona_core::models::narrative::NarrativeAnalysis;
use persona_quiz::{AnswerSet, CategoryScores};
use tracing::info;

use crate::backend::{LlmBackend, LlmMessage};
use crate::error::TwinError;

const ENRICHMENT_INSTRUCTIONS: &str = r#"Analyze these personality quiz answers and produce personalized insights.

Return only a JSON object of this shape:
{
  "personality_analysis": {
    "traits": [{"name": "trait", "score": 1, "description": "description"}],
    "strengths": ["strength"],
    "growth_areas": ["area"],
    "communication_style": "style"
  },
  "insights": ["insight1", "insight2", "insight3"],
  "recommendations": ["recommendation1", "recommendation2"],
  "growth_plan": {
    "focus_areas": ["area1", "area2"],
    "suggested_goals": ["goal1", "goal2"]
  }
}
Trait scores range from 1 to 10."#;

/// Build the single user message sent for enrichment.
pub fn build_enrichment_prompt(answers: &AnswerSet, previous: Option<&CategoryScores>) -> String {
    format!(
        "{ENRICHMENT_INSTRUCTIONS}\n\n{}",
        persona_quiz::to_structured_input(answers, previous)
    )
}

/// Ask the model for a narrative reading of a quiz submission.
pub async fn generate_quiz_insights(
    backend: &dyn LlmBackend,
    answers: &AnswerSet,
    previous: Option<&CategoryScores>,
) -> Result<NarrativeAnalysis, TwinError> {
    let messages = [LlmMessage::user(build_enrichment_prompt(answers, previous))];
    let response = backend.complete(&messages).await?;

    let analysis = parse_narrative(&response)?;
    info!(
        model_id = backend.model_id(),
        insights = analysis.insights.len(),
        "quiz enrichment complete"
    );
    Ok(analysis)
}

/// Decode a narrative from model output that may wrap the JSON in prose or
/// a code fence.
pub fn parse_narrative(response: &str) -> Result<NarrativeAnalysis, TwinError> {
    let json = extract_json_object(response).ok_or_else(|| {
        TwinError::ResponseParse(format!("no JSON object in response: {response}"))
    })?;
    serde_json::from_str(json).map_err(|e| {
        TwinError::SchemaViolation(format!("failed to parse NarrativeAnalysis: {e}"))
    })
}

/// The outermost `{...}` span of `text`, if any.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
