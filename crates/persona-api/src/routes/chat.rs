use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use persona_core::keys;
use persona_core::models::chat_history::{ChatHistoryRole, Conversation};
use persona_core::models::message_analysis::MessageAnalysis;
use persona_core::models::profile::UserProfile;
use persona_storage::objects;
use persona_twin::analysis::analyze_message;
use persona_twin::chat::{generate_reply, ReplyMetadata, MAX_MESSAGE_CHARS};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    conversation_id: Option<Uuid>,
    message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    conversation_id: Uuid,
    reply: String,
    metadata: ReplyMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis: Option<MessageAnalysis>,
}

pub async fn send_message(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("message is required".to_string()));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ApiError::BadRequest(format!(
            "message exceeds {MAX_MESSAGE_CHARS} characters"
        )));
    }

    let mut conversation = match request.conversation_id {
        Some(id) => {
            let key = keys::conversation(&user.sub, id);
            objects::find_json::<Conversation>(state.store.as_ref(), &key)
                .await?
                .ok_or_else(|| ApiError::NotFound(format!("conversation not found: {id}")))?
        }
        None => Conversation::new(&user.sub),
    };

    let profile: Option<UserProfile> =
        objects::find_json(state.store.as_ref(), &keys::profile(&user.sub)).await?;

    // Messages are only analyzed when a model is configured.
    let analysis = async {
        match state.llm.as_deref() {
            Some(llm) => Some(analyze_message(llm, message).await),
            None => None,
        }
    };
    let reply = generate_reply(
        state.llm.as_deref(),
        &conversation.messages,
        profile.as_ref(),
        message,
    );
    let (reply, analysis) = tokio::join!(reply, analysis);

    conversation.push_analyzed(ChatHistoryRole::User, message, analysis.clone());
    conversation.push(ChatHistoryRole::Assistant, reply.message.clone());
    objects::put_json(
        state.store.as_ref(),
        &keys::conversation(&user.sub, conversation.id),
        &conversation,
    )
    .await?;

    Ok(Json(ChatResponse {
        conversation_id: conversation.id,
        reply: reply.message,
        metadata: reply.metadata,
        analysis,
    }))
}

pub async fn get_conversation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Conversation>, ApiError> {
    let conversation = objects::find_json::<Conversation>(
        state.store.as_ref(),
        &keys::conversation(&user.sub, id),
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("conversation not found: {id}")))?;
    Ok(Json(conversation))
}
