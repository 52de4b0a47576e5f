use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use persona_api::state::AppState;
use persona_storage::memory::MemoryStore;
use persona_twin::backend::{BoxFuture, LlmBackend, LlmMessage};
use persona_twin::chat::FALLBACK_MODEL;
use persona_twin::error::TwinError;

const NARRATIVE: &str = r#"{
  "personality_analysis": {"traits": [], "strengths": ["curiosity"], "growth_areas": [], "communication_style": "warm"},
  "insights": ["You reflect before acting"],
  "recommendations": ["Journal weekly"],
  "growth_plan": {"focus_areas": ["patience", "rest"], "suggested_goals": []}
}"#;

struct CannedBackend(&'static str);

impl LlmBackend for CannedBackend {
    fn model_id(&self) -> &str {
        "canned"
    }

    fn complete<'a>(
        &'a self,
        _messages: &'a [LlmMessage],
    ) -> BoxFuture<'a, Result<String, TwinError>> {
        Box::pin(async move { Ok(self.0.to_string()) })
    }
}

fn app(llm: Option<Arc<dyn LlmBackend>>) -> Router {
    persona_api::app(AppState {
        store: Arc::new(MemoryStore::new()),
        llm,
    })
}

fn timestamp(value: &Value) -> jiff::Timestamp {
    serde_json::from_value(value.clone()).unwrap()
}

fn full_answers() -> Value {
    json!({
        "1": "very_uncomfortable",
        "2": "seek_support",
        "3": "follow_intuition",
        "4": "exhausted",
        "5": "detailed_plans",
        "6": "confront_directly",
        "7": "hands_on",
        "8": "strong_resistance",
        "9": "direct_objective",
        "10": "external_recognition"
    })
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("authorization", format!("Bearer {user}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn submit(app: &Router, user: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/quiz/submit",
        Some(user),
        Some(json!({"quiz_type": "personality", "answers": full_answers(), "completion_time": 95})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn health_is_public() {
    let app = app(None);
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn questions_are_public() {
    let app = app(None);
    let (status, body) = send(&app, "GET", "/quiz/questions", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 10);
    assert_eq!(questions[0]["id"], 1);
    assert!(!questions[0]["options"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn protected_routes_require_a_bearer_token() {
    let app = app(None);
    let (status, body) = send(&app, "GET", "/quiz/results", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, "POST", "/chat", None, Some(json!({"message": "hi"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn submit_scores_and_stores_result() {
    let app = app(None);
    let result = submit(&app, "alice").await;

    assert_eq!(result["user_id"], "alice");
    assert_eq!(result["quiz_type"], "personality");
    assert_eq!(result["completion_time"], 95);
    assert!(result["enrichment"].is_null());
    assert_eq!(result["results"]["growth_areas"], json!(["self-knowledge"]));
    assert!(result["results"]["overall_style"]["name"].is_string());
    assert_eq!(
        result["results"]["communication_style"],
        result["results"]["overall_style"]["name"]
    );
    assert_eq!(result["results"]["insights"].as_array().unwrap().len(), 3);

    let id = result["id"].as_str().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/quiz/results/{id}"), Some("alice"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, result);
}

#[tokio::test]
async fn submit_lists_missing_questions() {
    let app = app(None);
    let (status, body) = send(
        &app,
        "POST",
        "/quiz/submit",
        Some("alice"),
        Some(json!({"quiz_type": "personality", "answers": {"1": "neutral", "2": "act_quickly"}})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["missing_questions"],
        json!(["3", "4", "5", "6", "7", "8", "9", "10"])
    );
}

#[tokio::test]
async fn submit_rejects_non_positive_completion_time() {
    let app = app(None);
    let (status, body) = send(
        &app,
        "POST",
        "/quiz/submit",
        Some("alice"),
        Some(json!({"quiz_type": "mood", "answers": full_answers(), "completion_time": 0})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("missing_questions").is_none());
}

#[tokio::test]
async fn enrichment_is_stored_when_backend_answers() {
    let app = app(Some(Arc::new(CannedBackend(NARRATIVE))));
    let result = submit(&app, "alice").await;

    assert_eq!(
        result["enrichment"]["insights"],
        json!(["You reflect before acting"])
    );
    assert_eq!(result["results"]["growth_areas"], json!(["patience", "rest"]));
}

#[tokio::test]
async fn enrichment_failure_does_not_block_submission() {
    let app = app(Some(Arc::new(CannedBackend("not json at all"))));
    let result = submit(&app, "alice").await;

    assert!(result["enrichment"].is_null());
    assert_eq!(result["results"]["growth_areas"], json!(["self-knowledge"]));
}

#[tokio::test]
async fn results_are_scoped_to_the_caller() {
    let app = app(None);
    let result = submit(&app, "alice").await;
    submit(&app, "bob").await;

    let (status, listed) = send(&app, "GET", "/quiz/results", Some("alice"), None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], result["id"]);

    let id = result["id"].as_str().unwrap();
    let (status, _) = send(&app, "GET", &format!("/quiz/results/{id}"), Some("bob"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn results_filter_by_type_and_limit() {
    let app = app(None);
    submit(&app, "alice").await;
    submit(&app, "alice").await;
    submit(&app, "alice").await;

    let (_, limited) = send(&app, "GET", "/quiz/results?limit=2", Some("alice"), None).await;
    let limited = limited.as_array().unwrap();
    assert_eq!(limited.len(), 2);
    assert!(timestamp(&limited[0]["created_at"]) >= timestamp(&limited[1]["created_at"]));

    let (_, moods) = send(&app, "GET", "/quiz/results?type=mood", Some("alice"), None).await;
    assert!(moods.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn progress_tracks_one_category_oldest_first() {
    let app = app(None);
    submit(&app, "alice").await;
    submit(&app, "alice").await;

    let (status, body) = send(
        &app,
        "GET",
        "/quiz/progress/emotional_response",
        Some("alice"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "emotional_response");
    assert_eq!(body["quiz_type"], "personality");

    let points = body["progress"].as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert!(timestamp(&points[0]["date"]) <= timestamp(&points[1]["date"]));
    assert!(points.iter().all(|p| p["value"].is_u64()));
}

#[tokio::test]
async fn progress_rejects_unknown_category() {
    let app = app(None);
    let (status, body) = send(&app, "GET", "/quiz/progress/charisma", Some("alice"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("charisma"));
}

#[tokio::test]
async fn chat_without_backend_falls_back_and_persists() {
    let app = app(None);
    let (status, reply) = send(
        &app,
        "POST",
        "/chat",
        Some("alice"),
        Some(json!({"message": "  I feel stuck  "})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["metadata"]["fallback"], true);
    assert_eq!(reply["metadata"]["model"], FALLBACK_MODEL);

    let id = reply["conversation_id"].as_str().unwrap();
    let (status, conversation) = send(&app, "GET", &format!("/chat/{id}"), Some("alice"), None).await;
    assert_eq!(status, StatusCode::OK);

    let messages = conversation["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], "I feel stuck");
    assert!(messages[0].get("analysis").is_none());
    assert!(reply.get("analysis").is_none());
    assert_eq!(messages[1]["role"], "assistant");
    assert_eq!(messages[1]["content"], reply["reply"]);

    let (status, _) = send(&app, "GET", &format!("/chat/{id}"), Some("bob"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn chat_continues_an_existing_conversation() {
    let app = app(Some(Arc::new(CannedBackend("Tell me more."))));
    let (_, first) = send(&app, "POST", "/chat", Some("alice"), Some(json!({"message": "hello"}))).await;
    assert_eq!(first["reply"], "Tell me more.");
    assert_eq!(first["metadata"]["model"], "canned");
    assert_eq!(first["metadata"]["fallback"], false);

    let id = first["conversation_id"].clone();
    let (status, second) = send(
        &app,
        "POST",
        "/chat",
        Some("alice"),
        Some(json!({"conversation_id": id, "message": "ok"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["conversation_id"], id);

    let (_, conversation) = send(
        &app,
        "GET",
        &format!("/chat/{}", id.as_str().unwrap()),
        Some("alice"),
        None,
    )
    .await;
    let messages = conversation["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    // The canned backend never returns analysis JSON, so the neutral reading is kept.
    assert_eq!(messages[0]["analysis"]["sentiment"]["label"], "neutral");
    assert_eq!(messages[0]["analysis"]["urgency"], "low");
    assert!(messages[1].get("analysis").is_none());
    assert_eq!(first["analysis"], messages[0]["analysis"]);
}

#[tokio::test]
async fn chat_stores_model_message_analysis() {
    const ANALYSIS: &str = r#"{"sentiment": {"score": -0.4, "label": "negative"},
        "emotions": [], "topics": [{"topic": "work", "relevance": 0.9}],
        "urgency": "high", "needs_followup": true}"#;
    let app = app(Some(Arc::new(CannedBackend(ANALYSIS))));

    let (status, reply) = send(
        &app,
        "POST",
        "/chat",
        Some("alice"),
        Some(json!({"message": "my boss is impossible"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["analysis"]["urgency"], "high");
    assert_eq!(reply["analysis"]["needs_followup"], true);
    assert_eq!(reply["analysis"]["topics"][0]["topic"], "work");
}

#[tokio::test]
async fn chat_rejects_empty_and_oversized_messages() {
    let app = app(None);
    let (status, _) = send(&app, "POST", "/chat", Some("alice"), Some(json!({"message": "   "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let long = "a".repeat(2001);
    let (status, _) = send(&app, "POST", "/chat", Some("alice"), Some(json!({"message": long}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chat_with_unknown_conversation_is_not_found() {
    let app = app(None);
    let (status, _) = send(
        &app,
        "POST",
        "/chat",
        Some("alice"),
        Some(json!({"conversation_id": "7f0c1a52-3e1d-4b7a-9f8e-2c4d5e6f7a8b", "message": "hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
