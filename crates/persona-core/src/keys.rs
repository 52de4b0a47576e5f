//! Storage key conventions.
//!
//! Pure string functions with no storage dependency. These define the canonical
//! layout of objects in the result store. User ids come from bearer tokens
//! and are escaped so each user owns exactly one key segment.

use uuid::Uuid;

pub const QUIZ_RESULTS_PREFIX: &str = "quiz-results/";

pub fn quiz_results_prefix(user_id: &str) -> String {
    format!("{QUIZ_RESULTS_PREFIX}{}/", user_segment(user_id))
}

pub fn quiz_result(user_id: &str, id: Uuid) -> String {
    format!("{}{id}.json", quiz_results_prefix(user_id))
}

pub fn conversations_prefix(user_id: &str) -> String {
    format!("conversations/{}/", user_segment(user_id))
}

pub fn conversation(user_id: &str, id: Uuid) -> String {
    format!("{}{id}.json", conversations_prefix(user_id))
}

pub fn profile(user_id: &str) -> String {
    format!("profiles/{}.json", user_segment(user_id))
}

/// Escape everything outside `[A-Za-z0-9_-]` as `%XX` so a user id can never
/// introduce a path separator or collide with another id.
pub fn user_segment(user_id: &str) -> String {
    let mut out = String::with_capacity(user_id.len());
    for b in user_id.bytes() {
        if b.is_ascii_alphanumeric() || b == b'_' || b == b'-' {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}
