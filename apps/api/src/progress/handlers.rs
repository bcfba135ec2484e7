//! Axum route handlers for progress, dashboard and dashboard membership.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::progress::access::{check_access, AccessCheck, AccessDenial, ADD_UNIVERSITY, TOGGLE_TASK};
use crate::progress::aggregator::aggregate;
use crate::progress::dashboard::{summarize_dashboard, DashboardSummary};
use crate::progress::essay_status::{classify, EssayClassification};
use crate::progress::models::{EssayRecord, ProgressSummary};
use crate::state::AppState;
use crate::store::ApplicationStore;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AccessRequest {
    pub user_id: Option<String>,
    pub action: String,
}

#[derive(Debug, Deserialize)]
pub struct AddUniversityRequest {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddUniversityResponse {
    pub university_id: Uuid,
    pub newly_added: bool,
}

#[derive(Debug, Deserialize)]
pub struct ToggleTaskRequest {
    pub user_id: Option<String>,
    pub completed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedEssay {
    #[serde(flatten)]
    pub essay: EssayRecord,
    pub is_custom: bool,
    pub classification: EssayClassification,
}

// ────────────────────────────────────────────────────────────────────────────
// Shared gate helpers
// ────────────────────────────────────────────────────────────────────────────

/// Resolves the caller's id. Missing or blank ids get the sign-in message.
pub(crate) fn require_user(user_id: Option<&str>) -> Result<Uuid, AppError> {
    let raw = user_id
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Unauthorized(AccessDenial::SignInRequired.message().to_string()))?;
    Uuid::parse_str(raw).map_err(|_| AppError::Validation(format!("invalid user_id '{raw}'")))
}

/// Runs the access gate for a mutation and returns the caller's id when
/// allowed.
pub(crate) async fn authorize(
    store: &dyn ApplicationStore,
    user_id: Option<&str>,
    university_id: Uuid,
    action: &str,
) -> Result<Uuid, AppError> {
    let user = require_user(user_id)?;
    let added = store.is_university_added(user, university_id).await?;
    check_access(user_id, added, action).into_result()?;
    Ok(user)
}

async fn university_progress(
    store: &dyn ApplicationStore,
    user: Uuid,
    university_id: Uuid,
) -> Result<ProgressSummary, AppError> {
    let Some(university) = store.load_university(user, university_id).await? else {
        return Ok(aggregate(None, &[]));
    };
    let custom = store.load_custom_essays(user, university_id).await?;
    let source = university.into_source();
    Ok(aggregate(Some(&source), &custom))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/universities/:id/progress
///
/// Universities not on the dashboard report a zeroed, not-started summary.
pub async fn handle_university_progress(
    State(state): State<AppState>,
    Path(university_id): Path<Uuid>,
    Query(params): Query<UserQuery>,
) -> Result<Json<ProgressSummary>, AppError> {
    let user = require_user(params.user_id.as_deref())?;
    let summary = university_progress(state.store.as_ref(), user, university_id).await?;
    Ok(Json(summary))
}

/// GET /api/v1/universities/:id/essays
pub async fn handle_list_essays(
    State(state): State<AppState>,
    Path(university_id): Path<Uuid>,
    Query(params): Query<UserQuery>,
) -> Result<Json<Vec<ClassifiedEssay>>, AppError> {
    let user = require_user(params.user_id.as_deref())?;
    let store = state.store.as_ref();

    let prompts = match store.load_university(user, university_id).await? {
        Some(u) => u.essay_prompts,
        None => return Ok(Json(Vec::new())),
    };
    let custom = store.load_custom_essays(user, university_id).await?;

    let tagged = prompts
        .into_iter()
        .map(|e| (e, false))
        .chain(custom.into_iter().map(|e| (e, true)));
    let essays = tagged
        .map(|(essay, is_custom)| ClassifiedEssay {
            classification: classify(&essay),
            essay,
            is_custom,
        })
        .collect();

    Ok(Json(essays))
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Query(params): Query<UserQuery>,
) -> Result<Json<DashboardSummary>, AppError> {
    let user = require_user(params.user_id.as_deref())?;
    let store = state.store.as_ref();

    let mut summaries = Vec::new();
    for university_id in store.added_universities(user).await? {
        summaries.push(university_progress(store, user, university_id).await?);
    }

    Ok(Json(summarize_dashboard(&summaries)))
}

/// POST /api/v1/universities/:id/access
///
/// Advisory check for the UI: always 200, the body says whether the action
/// would be allowed. Ids that are not UUIDs own no universities.
pub async fn handle_access_check(
    State(state): State<AppState>,
    Path(university_id): Path<Uuid>,
    Json(req): Json<AccessRequest>,
) -> Result<Json<AccessCheck>, AppError> {
    let parsed = req
        .user_id
        .as_deref()
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok());
    let added = match parsed {
        Some(user) => state.store.is_university_added(user, university_id).await?,
        None => false,
    };
    Ok(Json(check_access(req.user_id.as_deref(), added, &req.action)))
}

/// POST /api/v1/universities/:id/add
pub async fn handle_add_university(
    State(state): State<AppState>,
    Path(university_id): Path<Uuid>,
    Json(req): Json<AddUniversityRequest>,
) -> Result<(StatusCode, Json<AddUniversityResponse>), AppError> {
    let store = state.store.as_ref();
    let user = authorize(store, req.user_id.as_deref(), university_id, ADD_UNIVERSITY).await?;

    if !store.university_exists(university_id).await? {
        return Err(AppError::NotFound(format!("University {university_id} not found")));
    }

    let newly_added = store.add_university(user, university_id).await?;
    if newly_added {
        info!("User {user} added university {university_id}");
    }

    let status = if newly_added {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(AddUniversityResponse {
            university_id,
            newly_added,
        }),
    ))
}

/// PATCH /api/v1/universities/:id/tasks/:task_id
///
/// Returns the recomputed university progress so the UI can refresh its bars.
pub async fn handle_toggle_task(
    State(state): State<AppState>,
    Path((university_id, task_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<ToggleTaskRequest>,
) -> Result<Json<ProgressSummary>, AppError> {
    let store = state.store.as_ref();
    let user = authorize(store, req.user_id.as_deref(), university_id, TOGGLE_TASK).await?;

    if !store
        .set_task_completed(user, university_id, task_id, req.completed)
        .await?
    {
        return Err(AppError::NotFound(format!("Task {task_id} not found")));
    }

    Ok(Json(university_progress(store, user, university_id).await?))
}
