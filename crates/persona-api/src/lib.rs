//! persona-api
//!
//! HTTP surface of the personality service: quiz catalogue, submission and
//! history, progress tracking and twin chat.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// Build the full router over the given state.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected: Router<AppState> = Router::new()
        .route("/quiz/submit", post(routes::quiz::submit_quiz))
        .route("/quiz/results", get(routes::quiz::list_results))
        .route("/quiz/results/{id}", get(routes::quiz::get_result))
        .route(
            "/quiz/progress/{category}",
            get(routes::quiz::get_progress),
        )
        .route("/chat", post(routes::chat::send_message))
        .route("/chat/{id}", get(routes::chat::get_conversation))
        .route_layer(axum_mw::from_fn(middleware::auth::require_auth));

    Router::new()
        // Health (no auth)
        .route("/health", get(routes::health::health_check))
        // Question catalogue (no auth, static data)
        .route("/quiz/questions", get(routes::quiz::list_questions))
        .merge(protected)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
