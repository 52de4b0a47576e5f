use persona_quiz::{
    AnswerSet, Category, CategoryScores, OverallStyle, PersonalityAnalysis, PersonalityTrait,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::narrative::NarrativeAnalysis;
use crate::error::CoreError;

/// Growth area stored when the narrative enrichment offers none.
pub const DEFAULT_GROWTH_AREA: &str = "self-knowledge";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum QuizType {
    #[default]
    Personality,
    Mood,
    InitialAssessment,
    WeeklyCheckIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StoredRecommendation {
    pub category: String,
    pub recommendation: String,
    pub priority: Priority,
}

/// A quiz submission as received from a client.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuizSubmission {
    pub quiz_type: QuizType,
    pub answers: AnswerSet,
    /// Seconds taken to complete the quiz.
    #[serde(default)]
    pub completion_time: Option<i64>,
}

impl QuizSubmission {
    /// Every catalogue question must be answered and the completion time,
    /// when given, must be at least one second.
    pub fn validate(&self) -> Result<(), CoreError> {
        if matches!(self.completion_time, Some(t) if t < 1) {
            return Err(CoreError::InvalidCompletionTime);
        }
        persona_quiz::validate_complete(&self.answers)?;
        Ok(())
    }
}

/// The analysis portion of a stored result.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StoredAnalysis {
    pub scores: CategoryScores,
    pub traits: Vec<PersonalityTrait>,
    pub insights: Vec<String>,
    pub recommendations: Vec<StoredRecommendation>,
    pub communication_style: String,
    pub growth_areas: Vec<String>,
    pub overall_style: OverallStyle,
}

/// A persisted quiz result.
///
/// Every field of `results` except `growth_areas` is reproducible by
/// re-scoring `answers`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuizResult {
    pub id: Uuid,
    pub user_id: String,
    pub quiz_type: QuizType,
    pub answers: AnswerSet,
    pub completion_time: Option<i64>,
    pub results: StoredAnalysis,
    pub enrichment: Option<NarrativeAnalysis>,
    pub created_at: jiff::Timestamp,
}

impl QuizResult {
    pub fn new(
        user_id: &str,
        submission: QuizSubmission,
        analysis: PersonalityAnalysis,
        enrichment: Option<NarrativeAnalysis>,
    ) -> Self {
        let growth_areas = enrichment
            .as_ref()
            .map(|e| e.growth_plan.focus_areas.clone())
            .filter(|areas| !areas.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_GROWTH_AREA.to_string()]);

        let recommendations = analysis
            .recommendations
            .into_iter()
            .map(|recommendation| StoredRecommendation {
                category: "General".to_string(),
                recommendation,
                priority: Priority::Medium,
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            quiz_type: submission.quiz_type,
            answers: submission.answers,
            completion_time: submission.completion_time,
            results: StoredAnalysis {
                scores: analysis.scores,
                traits: analysis.traits,
                insights: analysis.insights,
                recommendations,
                communication_style: analysis.overall_style.name.clone(),
                growth_areas,
                overall_style: analysis.overall_style,
            },
            enrichment,
            created_at: jiff::Timestamp::now(),
        }
    }

    pub fn score(&self, category: Category) -> u32 {
        self.results.scores.get(category)
    }
}

/// One point in a category's score history.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProgressPoint {
    pub date: jiff::Timestamp,
    pub value: u32,
}

/// Score history of one category across results, oldest first.
pub fn progress(results: &[QuizResult], category: Category) -> Vec<ProgressPoint> {
    let mut points: Vec<ProgressPoint> = results
        .iter()
        .map(|r| ProgressPoint {
            date: r.created_at,
            value: r.score(category),
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}
