use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use persona_core::keys;
use persona_core::models::profile::UserProfile;
use persona_core::models::quiz_result::{
    progress, ProgressPoint, QuizResult, QuizSubmission, QuizType,
};
use persona_quiz::{Category, Question};
use persona_storage::objects;
use persona_twin::narrative::generate_quiz_insights;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const DEFAULT_RESULTS_LIMIT: usize = 10;

#[derive(Serialize)]
pub struct QuestionList {
    questions: Vec<Question>,
}

pub async fn list_questions() -> Json<QuestionList> {
    Json(QuestionList {
        questions: persona_quiz::questions().to_vec(),
    })
}

/// Every stored result of one user, newest first.
async fn user_results(state: &AppState, user_id: &str) -> Result<Vec<QuizResult>, ApiError> {
    let prefix = keys::quiz_results_prefix(user_id);
    let mut results: Vec<QuizResult> = objects::list_json(state.store.as_ref(), &prefix).await?;
    results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(results)
}

pub async fn submit_quiz(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(submission): Json<QuizSubmission>,
) -> Result<(StatusCode, Json<QuizResult>), ApiError> {
    submission.validate()?;

    let previous = user_results(&state, &user.sub)
        .await?
        .into_iter()
        .find(|r| r.quiz_type == submission.quiz_type);

    let analysis = persona_quiz::score(&submission.answers);

    let enrichment = match state.llm.as_deref() {
        Some(llm) => {
            let previous_scores = previous.as_ref().map(|r| &r.results.scores);
            match generate_quiz_insights(llm, &submission.answers, previous_scores).await {
                Ok(narrative) => Some(narrative),
                Err(e) => {
                    warn!(error = %e, "quiz enrichment failed, storing deterministic analysis only");
                    None
                }
            }
        }
        None => None,
    };

    let result = QuizResult::new(&user.sub, submission, analysis, enrichment);
    let key = keys::quiz_result(&user.sub, result.id);
    objects::put_json(state.store.as_ref(), &key, &result).await?;

    let profile_key = keys::profile(&user.sub);
    let mut profile = objects::find_json::<UserProfile>(state.store.as_ref(), &profile_key)
        .await?
        .unwrap_or_else(|| UserProfile::new(&user.sub));
    profile.apply_result(&result);
    objects::put_json(state.store.as_ref(), &profile_key, &profile).await?;

    info!(
        result_id = %result.id,
        style = %result.results.overall_style.name,
        enriched = result.enrichment.is_some(),
        "quiz result stored"
    );

    Ok((StatusCode::CREATED, Json(result)))
}

#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    #[serde(rename = "type")]
    quiz_type: Option<QuizType>,
    limit: Option<usize>,
}

pub async fn list_results(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<Vec<QuizResult>>, ApiError> {
    let results = user_results(&state, &user.sub)
        .await?
        .into_iter()
        .filter(|r| query.quiz_type.is_none_or(|t| r.quiz_type == t))
        .take(query.limit.unwrap_or(DEFAULT_RESULTS_LIMIT))
        .collect();
    Ok(Json(results))
}

pub async fn get_result(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuizResult>, ApiError> {
    let key = keys::quiz_result(&user.sub, id);
    let result = objects::find_json::<QuizResult>(state.store.as_ref(), &key)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("result not found: {id}")))?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    quiz_type: Option<QuizType>,
}

#[derive(Serialize)]
pub struct ProgressResponse {
    category: Category,
    quiz_type: QuizType,
    progress: Vec<ProgressPoint>,
}

pub async fn get_progress(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(category): Path<String>,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let category: Category = category.parse()?;
    let quiz_type = query.quiz_type.unwrap_or_default();

    let results: Vec<QuizResult> = user_results(&state, &user.sub)
        .await?
        .into_iter()
        .filter(|r| r.quiz_type == quiz_type)
        .collect();

    Ok(Json(ProgressResponse {
        category,
        quiz_type,
        progress: progress(&results, category),
    }))
}
