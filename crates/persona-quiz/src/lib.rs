//! persona-quiz
//!
//! Personality quiz definitions and scoring. Pure data and pure functions,
//! no I/O. Maps a submitted answer set to per-category scores, derives
//! threshold traits and classifies an overall style from fixed rule tables.

pub mod catalog;
pub mod error;
pub mod rules;
pub mod scoring;

pub use catalog::{question, questions, Category, Question, QuizOption};
pub use error::QuizError;
pub use rules::{OverallStyle, PersonalityTrait, StyleKind, TraitLevel};
pub use scoring::{score, AnswerSet, CategoryScores, PersonalityAnalysis};

/// Question ids (ascending, as strings) that have no answer in `answers`.
pub fn missing_questions(answers: &AnswerSet) -> Vec<String> {
    questions()
        .iter()
        .filter(|q| !answers.contains(q.id))
        .map(|q| q.id.to_string())
        .collect()
}

/// Require an answer for every question in the catalogue.
pub fn validate_complete(answers: &AnswerSet) -> Result<(), QuizError> {
    let missing = missing_questions(answers);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(QuizError::Incomplete { missing })
    }
}

/// Format answers (and optionally earlier scores) as structured text for
/// inclusion in a narrative prompt.
pub fn to_structured_input(answers: &AnswerSet, previous: Option<&CategoryScores>) -> String {
    let mut output = String::from("## Personality Quiz\n\n### Answers\n");
    for q in questions() {
        let Some(value) = answers.get(q.id) else {
            continue;
        };
        let answer = q.option(value).map(|o| o.text.as_str()).unwrap_or(value);
        output.push_str(&format!("- [{}] {}\n  answer: {}\n", q.category, q.question, answer));
    }

    if let Some(scores) = previous {
        output.push_str("\n### Previous Scores\n");
        for (category, value) in scores.iter() {
            output.push_str(&format!("- {category}: {value}\n"));
        }
    }
    output
}
