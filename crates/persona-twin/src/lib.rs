//! persona-twin
//!
//! The "AI twin": language-model invocation, quiz narrative enrichment,
//! per-message analysis and conversational replies with deterministic
//! fallbacks.

pub mod analysis;
pub mod backend;
pub mod chat;
pub mod error;
pub mod narrative;
pub mod prompt;
