use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unanswered questions: {}", missing.join(", "))]
    Incomplete { missing: Vec<String> },
}
