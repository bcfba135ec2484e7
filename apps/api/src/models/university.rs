use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Dashboard membership. `enhanced_stats` holds a precomputed progress
/// summary when a background job has produced one.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserUniversityRow {
    pub user_id: Uuid,
    pub university_id: Uuid,
    pub enhanced_stats: Option<Value>,
    pub added_at: DateTime<Utc>,
}
