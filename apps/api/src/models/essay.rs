use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::warn;
use uuid::Uuid;

use crate::progress::models::{EssayRecord, EssayStatus, Priority};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EssayRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub university_id: Uuid,
    pub title: String,
    pub prompt: String,
    pub content: String,
    pub word_count: i32,
    pub word_limit: i32,
    pub status: Option<String>,
    pub is_completed: bool,
    pub priority: String,
    pub is_custom: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EssayRow {
    pub fn to_record(&self) -> EssayRecord {
        let status = self
            .status
            .as_deref()
            .and_then(|raw| match raw.parse::<EssayStatus>() {
                Ok(s) => Some(s),
                Err(e) => {
                    warn!("essay {}: {e}, treating as unset", self.id);
                    None
                }
            });

        EssayRecord {
            id: self.id.to_string(),
            title: self.title.clone(),
            prompt: self.prompt.clone(),
            word_count: self.word_count.max(0) as u32,
            word_limit: self.word_limit.max(0) as u32,
            status,
            is_completed: Some(self.is_completed),
            priority: Priority::parse_lenient(&self.priority),
        }
    }
}
