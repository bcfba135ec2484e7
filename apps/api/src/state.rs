use std::sync::Arc;

use crate::llm_client::LlmClient;
use crate::store::ApplicationStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Snapshot source for the progress core. Postgres in production, in-memory in tests.
    pub store: Arc<dyn ApplicationStore>,
    pub llm: LlmClient,
}
