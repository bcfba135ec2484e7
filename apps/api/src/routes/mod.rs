pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::essays::handlers as essays;
use crate::progress::handlers as progress;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/dashboard", get(progress::handle_dashboard))
        .route(
            "/api/v1/universities/:id/progress",
            get(progress::handle_university_progress),
        )
        .route(
            "/api/v1/universities/:id/essays",
            get(progress::handle_list_essays),
        )
        .route(
            "/api/v1/universities/:id/access",
            post(progress::handle_access_check),
        )
        .route(
            "/api/v1/universities/:id/add",
            post(progress::handle_add_university),
        )
        .route(
            "/api/v1/universities/:id/tasks/:task_id",
            patch(progress::handle_toggle_task),
        )
        .route(
            "/api/v1/universities/:id/essays/:essay_id",
            patch(essays::handle_edit_essay),
        )
        .route(
            "/api/v1/universities/:id/essays/:essay_id/feedback",
            post(essays::handle_essay_feedback),
        )
        .with_state(state)
}
