use std::sync::Arc;

use persona_storage::store::ObjectStore;
use persona_twin::backend::LlmBackend;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ObjectStore>,
    /// `None` disables quiz enrichment; chat falls back to canned replies.
    pub llm: Option<Arc<dyn LlmBackend>>,
}
