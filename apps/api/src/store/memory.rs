use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::essays::EssayUpdate;
use crate::progress::models::{
    EnhancedStats, EssayRecord, Priority, TaskOrEvent, UniversitySummary, COMPLETED_MARKER,
};
use crate::store::ApplicationStore;

struct StoredEssay {
    user_id: Uuid,
    university_id: Uuid,
    id: Uuid,
    custom: bool,
    content: String,
    record: EssayRecord,
}

struct StoredTask {
    user_id: Uuid,
    university_id: Uuid,
    id: Uuid,
    calendar_event: bool,
    record: TaskOrEvent,
}

#[derive(Default)]
struct Inner {
    universities: HashSet<Uuid>,
    added: Vec<(Uuid, Uuid)>,
    enhanced: HashMap<(Uuid, Uuid), EnhancedStats>,
    essays: Vec<StoredEssay>,
    tasks: Vec<StoredTask>,
}

/// Store used by handler tests. Insertion order is preserved so snapshots
/// come back in a stable order.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_catalog_university(&self, university_id: Uuid) {
        self.inner.lock().unwrap().universities.insert(university_id);
    }

    pub fn set_enhanced_stats(&self, user_id: Uuid, university_id: Uuid, stats: EnhancedStats) {
        self.inner
            .lock()
            .unwrap()
            .enhanced
            .insert((user_id, university_id), stats);
    }

    pub fn insert_essay(
        &self,
        user_id: Uuid,
        university_id: Uuid,
        word_count: u32,
        word_limit: u32,
        custom: bool,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().unwrap().essays.push(StoredEssay {
            user_id,
            university_id,
            id,
            custom,
            content: String::new(),
            record: EssayRecord {
                id: id.to_string(),
                title: "Essay".to_string(),
                prompt: "Why this program?".to_string(),
                word_count,
                word_limit,
                status: None,
                is_completed: None,
                priority: Priority::Medium,
            },
        });
        id
    }

    pub fn insert_task(
        &self,
        user_id: Uuid,
        university_id: Uuid,
        date: DateTime<Utc>,
        calendar_event: bool,
        completed: bool,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().unwrap().tasks.push(StoredTask {
            user_id,
            university_id,
            id,
            calendar_event,
            record: TaskOrEvent {
                id: id.to_string(),
                date,
                status: completed.then(|| COMPLETED_MARKER.to_string()),
                completion_status: None,
            },
        });
        id
    }

    pub fn essay_content(&self, essay_id: Uuid) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        inner
            .essays
            .iter()
            .find(|e| e.id == essay_id)
            .map(|e| e.content.clone())
    }
}

#[async_trait]
impl ApplicationStore for InMemoryStore {
    async fn university_exists(&self, university_id: Uuid) -> Result<bool, AppError> {
        Ok(self.inner.lock().unwrap().universities.contains(&university_id))
    }

    async fn is_university_added(
        &self,
        user_id: Uuid,
        university_id: Uuid,
    ) -> Result<bool, AppError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .added
            .contains(&(user_id, university_id)))
    }

    async fn add_university(&self, user_id: Uuid, university_id: Uuid) -> Result<bool, AppError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.added.contains(&(user_id, university_id)) {
            return Ok(false);
        }
        inner.added.push((user_id, university_id));
        Ok(true)
    }

    async fn added_universities(&self, user_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .added
            .iter()
            .filter(|(u, _)| *u == user_id)
            .map(|(_, id)| *id)
            .collect())
    }

    async fn load_university(
        &self,
        user_id: Uuid,
        university_id: Uuid,
    ) -> Result<Option<UniversitySummary>, AppError> {
        let inner = self.inner.lock().unwrap();
        if !inner.added.contains(&(user_id, university_id)) {
            return Ok(None);
        }
        if let Some(stats) = inner.enhanced.get(&(user_id, university_id)) {
            return Ok(Some(UniversitySummary {
                enhanced_stats: Some(stats.clone()),
                ..Default::default()
            }));
        }

        let owned = |u: Uuid, uni: Uuid| u == user_id && uni == university_id;
        let essay_prompts = inner
            .essays
            .iter()
            .filter(|e| owned(e.user_id, e.university_id) && !e.custom)
            .map(|e| e.record.clone())
            .collect();
        let tasks_of = |calendar: bool| -> Vec<TaskOrEvent> {
            inner
                .tasks
                .iter()
                .filter(|t| owned(t.user_id, t.university_id) && t.calendar_event == calendar)
                .map(|t| t.record.clone())
                .collect()
        };

        Ok(Some(UniversitySummary {
            essay_prompts,
            calendar_events: tasks_of(true),
            tasks_and_events: tasks_of(false),
            ..Default::default()
        }))
    }

    async fn load_custom_essays(
        &self,
        user_id: Uuid,
        university_id: Uuid,
    ) -> Result<Vec<EssayRecord>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .essays
            .iter()
            .filter(|e| e.user_id == user_id && e.university_id == university_id && e.custom)
            .map(|e| e.record.clone())
            .collect())
    }

    async fn find_essay(
        &self,
        user_id: Uuid,
        university_id: Uuid,
        essay_id: Uuid,
    ) -> Result<Option<EssayRecord>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .essays
            .iter()
            .find(|e| e.id == essay_id && e.user_id == user_id && e.university_id == university_id)
            .map(|e| e.record.clone()))
    }

    async fn update_essay(
        &self,
        user_id: Uuid,
        university_id: Uuid,
        essay_id: Uuid,
        update: &EssayUpdate,
    ) -> Result<Option<EssayRecord>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(essay) = inner
            .essays
            .iter_mut()
            .find(|e| e.id == essay_id && e.user_id == user_id && e.university_id == university_id)
        else {
            return Ok(None);
        };

        if let Some(content) = &update.content {
            essay.content = content.clone();
        }
        if let Some(words) = update.resolved_word_count() {
            essay.record.word_count = words;
        }
        if let Some(status) = update.status {
            essay.record.status = Some(status);
        }
        if let Some(done) = update.is_completed {
            essay.record.is_completed = Some(done);
        }
        Ok(Some(essay.record.clone()))
    }

    async fn set_task_completed(
        &self,
        user_id: Uuid,
        university_id: Uuid,
        task_id: Uuid,
        completed: bool,
    ) -> Result<bool, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(task) = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id && t.user_id == user_id && t.university_id == university_id)
        else {
            return Ok(false);
        };

        task.record.set_completed(completed);
        Ok(true)
    }
}
