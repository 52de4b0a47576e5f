pub mod chat_history;
pub mod message_analysis;
pub mod narrative;
pub mod profile;
pub mod quiz_result;
