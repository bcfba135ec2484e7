//! Axum route handlers for essay editing and feedback.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::essays::feedback::{request_feedback, EssayFeedback};
use crate::essays::EssayUpdate;
use crate::progress::access::{EDIT_ESSAY, ESSAY_FEEDBACK};
use crate::progress::essay_status::{classify, EssayClassification};
use crate::progress::handlers::authorize;
use crate::progress::models::EssayRecord;
use crate::state::AppState;
use crate::store::ApplicationStore;

#[derive(Debug, Deserialize)]
pub struct EditEssayRequest {
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub update: EssayUpdate,
}

#[derive(Debug, Serialize)]
pub struct EditEssayResponse {
    pub essay: EssayRecord,
    pub classification: EssayClassification,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub user_id: Option<String>,
    pub draft: String,
}

/// PATCH /api/v1/universities/:id/essays/:essay_id
pub async fn handle_edit_essay(
    State(state): State<AppState>,
    Path((university_id, essay_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<EditEssayRequest>,
) -> Result<Json<EditEssayResponse>, AppError> {
    let store = state.store.as_ref();
    let user = authorize(store, req.user_id.as_deref(), university_id, EDIT_ESSAY).await?;

    if req.update.is_empty() {
        return Err(AppError::Validation("nothing to update".to_string()));
    }

    let essay = store
        .update_essay(user, university_id, essay_id, &req.update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Essay {essay_id} not found")))?;

    Ok(Json(EditEssayResponse {
        classification: classify(&essay),
        essay,
    }))
}

/// POST /api/v1/universities/:id/essays/:essay_id/feedback
pub async fn handle_essay_feedback(
    State(state): State<AppState>,
    Path((university_id, essay_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<EssayFeedback>, AppError> {
    let store = state.store.as_ref();
    let user = authorize(store, req.user_id.as_deref(), university_id, ESSAY_FEEDBACK).await?;

    let essay = store
        .find_essay(user, university_id, essay_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Essay {essay_id} not found")))?;

    let feedback = request_feedback(&state.llm, &essay, &req.draft).await?;
    Ok(Json(feedback))
}
