//! Twin conversation replies.

use std::time::Instant;

use persona_core::models::chat_history::ChatHistoryMessage;
use persona_core::models::profile::UserProfile;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::backend::{LlmBackend, LlmMessage};
use crate::prompt;

/// Longest accepted user message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 2000;

pub const FALLBACK_MODEL: &str = "fallback";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyMetadata {
    pub model: String,
    pub response_time_ms: u64,
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
    pub metadata: ReplyMetadata,
}

/// Topic of a message, as far as the fallback picker can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyTopic {
    Greeting,
    Help,
    Feelings,
    Goals,
    Work,
    Stress,
    General,
}

/// How a keyword is matched against the words of a message.
#[derive(Debug, Clone, Copy)]
enum Cue {
    /// The whole word.
    Word(&'static str),
    /// Any word starting with the stem.
    Stem(&'static str),
}

impl Cue {
    fn matches(self, word: &str) -> bool {
        match self {
            Cue::Word(w) => word == w,
            Cue::Stem(stem) => word.starts_with(stem),
        }
    }
}

struct TopicRule {
    topic: ReplyTopic,
    cues: &'static [Cue],
    replies: &'static [&'static str],
}

/// Evaluated top to bottom; the first rule with a matching cue wins.
static TOPIC_RULES: &[TopicRule] = &[
    TopicRule {
        topic: ReplyTopic::Greeting,
        cues: &[Cue::Word("hello"), Cue::Word("hi"), Cue::Word("hey"), Cue::Word("howdy")],
        replies: &[
            "Hello! It's great to see you here again. How are you feeling today? Is there anything specific you'd like to talk about or explore together?",
            "Hi! I'm glad you came to talk with me. Tell me, how has your day been? What's on your mind?",
            "Hello! I'm here to listen and support you. How are you? Has anything caught your attention today?",
        ],
    },
    TopicRule {
        topic: ReplyTopic::Help,
        cues: &[Cue::Stem("help"), Cue::Stem("need"), Cue::Stem("support"), Cue::Stem("advice")],
        replies: &[
            "Of course, I'm here to help! Tell me more about what you need. The more you share, the better I can support you.",
            "I'd be glad to help! Can you explain the situation a little more? Sometimes talking through the details already helps us see things more clearly.",
            "You can count on me! Tell me more about what's going on. Together we can find a perspective that works for you.",
        ],
    },
    TopicRule {
        topic: ReplyTopic::Feelings,
        cues: &[
            Cue::Stem("feel"),
            Cue::Stem("emotion"),
            Cue::Stem("sad"),
            Cue::Stem("happy"),
            Cue::Stem("anxi"),
            Cue::Stem("worr"),
        ],
        replies: &[
            "I understand you're going through this. Your feelings are valid and it's important to acknowledge them. How has this been affecting you?",
            "Thank you for sharing this with me. Feelings can be complex, right? Tell me more about how you've been handling the situation.",
            "It's brave of you to talk about these feelings. How would you feel if you could change something about this situation?",
        ],
    },
    TopicRule {
        topic: ReplyTopic::Goals,
        cues: &[
            Cue::Stem("goal"),
            Cue::Stem("plan"),
            Cue::Stem("dream"),
            Cue::Stem("future"),
            Cue::Stem("want"),
        ],
        replies: &[
            "How interesting! Goals are important for our growth. Tell me more about what motivates you here.",
            "I'm glad you're thinking about goals! What is the first small step you could take today?",
            "Great focus! Goals give us direction. How do you picture your life once you get there?",
        ],
    },
    TopicRule {
        topic: ReplyTopic::Work,
        cues: &[
            Cue::Stem("work"),
            Cue::Stem("job"),
            Cue::Stem("career"),
            Cue::Stem("profession"),
            Cue::Stem("boss"),
        ],
        replies: &[
            "Work is an important part of life! Tell me more about your professional situation. What has been challenging you lately?",
            "I understand work can be complicated. How have you been feeling about your responsibilities?",
            "I'm glad you want to talk about work! Which part of it has been on your mind the most?",
        ],
    },
    TopicRule {
        topic: ReplyTopic::Stress,
        cues: &[
            Cue::Stem("stress"),
            Cue::Stem("tired"),
            Cue::Stem("exhaust"),
            Cue::Stem("overwhelm"),
            Cue::Stem("pressure"),
        ],
        replies: &[
            "Stress is something we all face. You're being very brave by recognizing it. What else has been worrying you?",
            "I understand you're feeling overloaded. Let's think about some strategies together. What usually helps you relax?",
            "It's normal to feel stressed sometimes. Tell me more about what's happening; talking often helps organize our thoughts.",
        ],
    },
];

static GENERAL_REPLIES: &[&str] = &[
    "Interesting perspective! Tell me more about it. What else do you think about this?",
    "I see where you're going. Every situation is unique and deserves attention. How do you feel when you think about it?",
    "I can tell there is something important here for you. Which parts of this situation stand out to you the most?",
    "I sense this is meaningful to you. How does it connect with what you've been living lately?",
    "What an interesting reflection! What do you think it reveals about you?",
];

fn words(message: &str) -> impl Iterator<Item = &str> {
    message
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}

fn matching_rule(user_message: &str) -> Option<&'static TopicRule> {
    let lowered = user_message.to_lowercase();
    TOPIC_RULES.iter().find(|rule| {
        words(&lowered).any(|word| rule.cues.iter().any(|cue| cue.matches(word)))
    })
}

/// Classify a message by keyword.
pub fn reply_topic(user_message: &str) -> ReplyTopic {
    matching_rule(user_message).map_or(ReplyTopic::General, |rule| rule.topic)
}

/// The canned replies available for a topic.
pub fn topic_replies(topic: ReplyTopic) -> &'static [&'static str] {
    TOPIC_RULES
        .iter()
        .find(|rule| rule.topic == topic)
        .map_or(GENERAL_REPLIES, |rule| rule.replies)
}

/// Pick a canned reply from the pool matching the message's topic. Stable
/// for a given message.
pub fn fallback_reply(user_message: &str) -> &'static str {
    let pool = topic_replies(reply_topic(user_message));
    let sum = user_message
        .bytes()
        .fold(0usize, |acc, b| acc.wrapping_add(b as usize));
    pool[sum % pool.len()]
}

fn fallback(user_message: &str) -> ChatReply {
    ChatReply {
        message: fallback_reply(user_message).to_string(),
        metadata: ReplyMetadata {
            model: FALLBACK_MODEL.to_string(),
            response_time_ms: 0,
            fallback: true,
        },
    }
}

/// Generate the twin's reply to `user_message`.
///
/// `history` is the conversation so far, excluding `user_message`. Never
/// fails: without a backend, or when the backend errors, a fallback reply
/// is returned instead.
pub async fn generate_reply(
    backend: Option<&dyn LlmBackend>,
    history: &[ChatHistoryMessage],
    profile: Option<&UserProfile>,
    user_message: &str,
) -> ChatReply {
    let Some(backend) = backend else {
        return fallback(user_message);
    };

    let mut messages = vec![LlmMessage::system(prompt::build_system_prompt(profile))];
    messages.extend(prompt::build_conversation_context(history, profile));
    messages.push(LlmMessage::user(user_message));

    let started = Instant::now();
    match backend.complete(&messages).await {
        Ok(message) => {
            let response_time_ms = started.elapsed().as_millis() as u64;
            info!(model_id = backend.model_id(), response_time_ms, "twin reply generated");
            ChatReply {
                message,
                metadata: ReplyMetadata {
                    model: backend.model_id().to_string(),
                    response_time_ms,
                    fallback: false,
                },
            }
        }
        Err(e) => {
            warn!(error = %e, "twin reply failed, using fallback");
            fallback(user_message)
        }
    }
}
