use persona_quiz::QuizError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Quiz(#[from] QuizError),

    #[error("completion time must be a positive number of seconds")]
    InvalidCompletionTime,
}
