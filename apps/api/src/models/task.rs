use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::progress::models::TaskOrEvent;

pub const KIND_CALENDAR_EVENT: &str = "calendar_event";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TaskRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub university_id: Uuid,
    pub kind: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub status: Option<String>,
    pub completion_status: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TaskRow {
    pub fn to_record(&self) -> TaskOrEvent {
        TaskOrEvent {
            id: self.id.to_string(),
            date: self.date,
            status: self.status.clone(),
            completion_status: self.completion_status.clone(),
        }
    }

    pub fn is_calendar_event(&self) -> bool {
        self.kind == KIND_CALENDAR_EVENT
    }
}
