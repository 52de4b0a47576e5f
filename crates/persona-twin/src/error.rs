use thiserror::Error;

#[derive(Debug, Error)]
pub enum TwinError {
    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("model call timed out after {0}s")]
    Timeout(u64),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("response did not conform to expected schema: {0}")]
    SchemaViolation(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
