//! Prompt assembly for twin conversations.

use persona_core::models::chat_history::{ChatHistoryMessage, ChatHistoryRole};
use persona_core::models::profile::{ConversationStyle, UserProfile};

use crate::backend::LlmMessage;

/// Number of history messages carried into each completion.
pub const CONTEXT_WINDOW: usize = 20;

const GUIDELINES: &str = "\
GUIDELINES:
1. Always be empathetic, welcoming and genuinely interested
2. Offer personalized insights based on the user's profile
3. Ask reflective questions that promote self-knowledge
4. Suggest practical, specific actions when appropriate
5. Celebrate progress and offer support through difficulties
6. Keep a conversational, human tone
7. Be concise but meaningful (at most 3 paragraphs)

NEVER:
- Offer medical or psychological diagnoses
- Replace mental health professionals
- Be generic or robotic
- Ignore the user's personal context

If the user is in crisis or mentions self-harm, encourage them to seek professional help immediately.";

pub fn persona_line(style: ConversationStyle) -> &'static str {
    match style {
        ConversationStyle::Supportive => {
            "You are an empathetic, welcoming therapist who offers genuine emotional support."
        }
        ConversationStyle::Analytical => {
            "You are an analytical coach who helps through insights grounded in data and patterns."
        }
        ConversationStyle::Motivational => {
            "You are a motivational mentor who inspires action and personal growth."
        }
        ConversationStyle::Gentle => {
            "You are a gentle guide who offers wisdom with compassion and patience."
        }
    }
}

/// Build the system prompt for a user's twin.
pub fn build_system_prompt(profile: Option<&UserProfile>) -> String {
    let style = profile.map(|p| p.conversation_style).unwrap_or_default();
    let name = profile
        .and_then(|p| p.name.as_deref())
        .unwrap_or("the user");

    format!(
        "{}\n\n\
         IMPORTANT: You are the personal AI twin of {name}. You know deeply:\n\
         - Their personality and behavior patterns\n\
         - Their personal goals and values\n\
         - Their conversation history and growth\n\
         - Their communication preferences\n\n\
         {GUIDELINES}",
        persona_line(style),
    )
}

/// Summarize what the quiz revealed about the user, if anything.
pub fn build_personality_context(profile: &UserProfile) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(style) = &profile.personality_type {
        parts.push(format!("overall style: {style}"));
    }
    if !profile.dominant_traits.is_empty() {
        parts.push(format!("traits: {}", profile.dominant_traits.join(", ")));
    }

    if parts.is_empty() {
        None
    } else {
        Some(format!("Personality context: {}", parts.join("; ")))
    }
}

/// Convert the most recent history into completion messages, preceded by
/// the personality context when the profile has one.
pub fn build_conversation_context(
    history: &[ChatHistoryMessage],
    profile: Option<&UserProfile>,
) -> Vec<LlmMessage> {
    let start = history.len().saturating_sub(CONTEXT_WINDOW);

    let mut messages = Vec::with_capacity(CONTEXT_WINDOW + 1);
    if let Some(context) = profile.and_then(build_personality_context) {
        messages.push(LlmMessage::system(context));
    }
    messages.extend(history[start..].iter().map(|m| match m.role {
        ChatHistoryRole::User => LlmMessage::user(&m.content),
        ChatHistoryRole::Assistant => LlmMessage::assistant(&m.content),
    }));
    messages
}
