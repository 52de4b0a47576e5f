use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::QuizError;

/// One of the ten fixed personality dimensions measured by the quiz.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Category {
    EmotionalResponse,
    StressManagement,
    DecisionMaking,
    SocialEnergy,
    GoalSetting,
    ConflictResolution,
    LearningStyle,
    ChangeAdaptation,
    CommunicationStyle,
    MotivationSource,
}

impl Category {
    /// All categories in canonical (question id) order.
    pub const ALL: [Category; 10] = [
        Category::EmotionalResponse,
        Category::StressManagement,
        Category::DecisionMaking,
        Category::SocialEnergy,
        Category::GoalSetting,
        Category::ConflictResolution,
        Category::LearningStyle,
        Category::ChangeAdaptation,
        Category::CommunicationStyle,
        Category::MotivationSource,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::EmotionalResponse => "emotional_response",
            Category::StressManagement => "stress_management",
            Category::DecisionMaking => "decision_making",
            Category::SocialEnergy => "social_energy",
            Category::GoalSetting => "goal_setting",
            Category::ConflictResolution => "conflict_resolution",
            Category::LearningStyle => "learning_style",
            Category::ChangeAdaptation => "change_adaptation",
            Category::CommunicationStyle => "communication_style",
            Category::MotivationSource => "motivation_source",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| QuizError::UnknownCategory(s.to_string()))
    }
}

/// A selectable answer within a question.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuizOption {
    /// Token submitted by the client; unique within its question.
    pub value: String,
    pub text: String,
    /// Contribution to the question's category, 1 to 5.
    pub score: u32,
}

/// A single-choice quiz question. Each question feeds exactly one category.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: u32,
    pub category: Category,
    pub question: String,
    pub options: Vec<QuizOption>,
}

impl Question {
    /// Look up an option by its submitted token.
    pub fn option(&self, value: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

/// The question catalogue, ordered by id.
pub fn questions() -> &'static [Question] {
    &QUESTIONS
}

/// Look up a question by id.
pub fn question(id: u32) -> Option<&'static Question> {
    BY_ID.get(&id).copied()
}

static BY_ID: LazyLock<HashMap<u32, &'static Question>> =
    LazyLock::new(|| QUESTIONS.iter().map(|q| (q.id, q)).collect());

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    vec![
        q(
            1,
            Category::EmotionalResponse,
            "How do you feel when you are alone?",
            &[
                ("very_uncomfortable", "Very uncomfortable", 1),
                ("uncomfortable", "Uncomfortable", 2),
                ("neutral", "Neutral", 3),
                ("comfortable", "Comfortable", 4),
                ("very_comfortable", "Very comfortable", 5),
            ],
        ),
        q(
            2,
            Category::StressManagement,
            "When facing a stressful situation, your first reaction is to:",
            &[
                ("seek_support", "Seek support from other people", 1),
                ("analyze_logically", "Analyze the situation logically", 2),
                ("act_quickly", "Take immediate action", 3),
                ("need_time", "Need time to process", 4),
                ("avoid_situation", "Avoid or postpone the situation", 5),
            ],
        ),
        q(
            3,
            Category::DecisionMaking,
            "When making important decisions, you tend to:",
            &[
                ("follow_intuition", "Follow your intuition", 1),
                ("analyze_data", "Analyze all available data", 2),
                ("consult_others", "Consult other people", 3),
                ("consider_feelings", "Consider how you feel about the options", 4),
                ("procrastinate", "Put it off until the last moment", 5),
            ],
        ),
        q(
            4,
            Category::SocialEnergy,
            "After a long social day, you feel:",
            &[
                ("energized", "Energized and wanting more interaction", 5),
                ("satisfied", "Satisfied but ready to relax", 4),
                ("neutral", "Normal, no significant change", 3),
                ("tired", "Mentally tired", 2),
                ("exhausted", "Completely exhausted", 1),
            ],
        ),
        q(
            5,
            Category::GoalSetting,
            "How do you prefer to set and pursue goals?",
            &[
                ("detailed_plans", "With detailed plans and specific deadlines", 1),
                ("general_guidelines", "With general guidelines and flexibility", 2),
                ("natural_flow", "Letting things flow naturally", 3),
                ("external_pressure", "With external pressure or accountability", 4),
                ("avoid_goals", "I avoid setting formal goals", 5),
            ],
        ),
        q(
            6,
            Category::ConflictResolution,
            "When there is conflict, you tend to:",
            &[
                ("confront_directly", "Confront it directly", 1),
                ("seek_mediation", "Seek mediation", 2),
                ("avoid_conflict", "Avoid the conflict", 3),
                ("give_in", "Give in to keep the peace", 4),
                ("analyze_first", "Analyze before acting", 5),
            ],
        ),
        q(
            7,
            Category::LearningStyle,
            "You learn best through:",
            &[
                ("hands_on", "Hands-on practice", 1),
                ("reading_theory", "Reading and theory", 2),
                ("group_discussion", "Group discussion", 3),
                ("individual_reflection", "Individual reflection", 4),
                ("visual_examples", "Visual examples", 5),
            ],
        ),
        q(
            8,
            Category::ChangeAdaptation,
            "How do you react to unexpected changes?",
            &[
                ("excitement", "With excitement and curiosity", 5),
                ("cautious_optimism", "With caution but optimism", 4),
                ("neutral_adaptive", "In a neutral, adaptive way", 3),
                ("anxious_resistance", "With anxiety and some resistance", 2),
                ("strong_resistance", "With strong resistance", 1),
            ],
        ),
        q(
            9,
            Category::CommunicationStyle,
            "Your communication style is mostly:",
            &[
                ("direct_objective", "Direct and objective", 1),
                ("diplomatic_careful", "Diplomatic and careful", 2),
                ("expressive_emotional", "Expressive and emotional", 3),
                ("active_listener", "Active listener", 4),
                ("reserved_selective", "Reserved and selective", 5),
            ],
        ),
        q(
            10,
            Category::MotivationSource,
            "What motivates you most?",
            &[
                ("external_recognition", "External recognition", 1),
                ("personal_growth", "Personal growth", 2),
                ("impact_on_others", "Positive impact on others", 3),
                ("autonomy_freedom", "Autonomy and freedom", 4),
                ("security_stability", "Security and stability", 5),
            ],
        ),
    ]
});

fn q(id: u32, category: Category, question: &str, options: &[(&str, &str, u32)]) -> Question {
    Question {
        id,
        category,
        question: question.to_string(),
        options: options
            .iter()
            .map(|(value, text, score)| QuizOption {
                value: value.to_string(),
                text: text.to_string(),
                score: *score,
            })
            .collect(),
    }
}
