use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::essays::EssayUpdate;
use crate::models::essay::EssayRow;
use crate::models::task::TaskRow;
use crate::models::university::UserUniversityRow;
use crate::progress::models::{EnhancedStats, EssayRecord, UniversitySummary};
use crate::store::ApplicationStore;

/// sqlx-backed store. Every method is a single query or a short sequence of
/// statements; no transaction outlives the call that opened it.
#[derive(Clone)]
pub struct PgApplicationStore {
    pool: PgPool,
}

impl PgApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn essays(
        &self,
        user_id: Uuid,
        university_id: Uuid,
        custom: bool,
    ) -> Result<Vec<EssayRecord>, AppError> {
        let rows = sqlx::query_as::<_, EssayRow>(
            r#"
            SELECT * FROM essays
            WHERE user_id = $1 AND university_id = $2 AND is_custom = $3
            ORDER BY created_at, id
            "#,
        )
        .bind(user_id)
        .bind(university_id)
        .bind(custom)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(EssayRow::to_record).collect())
    }
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn university_exists(&self, university_id: Uuid) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM universities WHERE id = $1)")
                .bind(university_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn is_university_added(
        &self,
        user_id: Uuid,
        university_id: Uuid,
    ) -> Result<bool, AppError> {
        let added: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM user_universities WHERE user_id = $1 AND university_id = $2)",
        )
        .bind(user_id)
        .bind(university_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(added)
    }

    async fn add_university(&self, user_id: Uuid, university_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_universities (user_id, university_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, university_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(university_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn added_universities(&self, user_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT university_id FROM user_universities WHERE user_id = $1 ORDER BY added_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn load_university(
        &self,
        user_id: Uuid,
        university_id: Uuid,
    ) -> Result<Option<UniversitySummary>, AppError> {
        let membership = sqlx::query_as::<_, UserUniversityRow>(
            "SELECT * FROM user_universities WHERE user_id = $1 AND university_id = $2",
        )
        .bind(user_id)
        .bind(university_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(membership) = membership else {
            return Ok(None);
        };

        // Unreadable stats fall back to recomputing from the raw rows.
        let enhanced_stats = membership.enhanced_stats.and_then(|value| {
            serde_json::from_value::<EnhancedStats>(value)
                .map_err(|e| {
                    warn!("university {university_id}: ignoring malformed enhanced_stats: {e}")
                })
                .ok()
        });

        if enhanced_stats.is_some() {
            debug!("university {university_id}: using precomputed stats");
            return Ok(Some(UniversitySummary {
                enhanced_stats,
                ..Default::default()
            }));
        }

        let essay_prompts = self.essays(user_id, university_id, false).await?;

        let tasks = sqlx::query_as::<_, TaskRow>(
            "SELECT * FROM tasks WHERE user_id = $1 AND university_id = $2 ORDER BY date, id",
        )
        .bind(user_id)
        .bind(university_id)
        .fetch_all(&self.pool)
        .await?;

        let (calendar, other): (Vec<&TaskRow>, Vec<&TaskRow>) =
            tasks.iter().partition(|t| t.is_calendar_event());

        Ok(Some(UniversitySummary {
            essay_prompts,
            calendar_events: calendar.into_iter().map(TaskRow::to_record).collect(),
            tasks_and_events: other.into_iter().map(TaskRow::to_record).collect(),
            ..Default::default()
        }))
    }

    async fn load_custom_essays(
        &self,
        user_id: Uuid,
        university_id: Uuid,
    ) -> Result<Vec<EssayRecord>, AppError> {
        self.essays(user_id, university_id, true).await
    }

    async fn find_essay(
        &self,
        user_id: Uuid,
        university_id: Uuid,
        essay_id: Uuid,
    ) -> Result<Option<EssayRecord>, AppError> {
        let row = sqlx::query_as::<_, EssayRow>(
            "SELECT * FROM essays WHERE id = $1 AND user_id = $2 AND university_id = $3",
        )
        .bind(essay_id)
        .bind(user_id)
        .bind(university_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(EssayRow::to_record))
    }

    async fn update_essay(
        &self,
        user_id: Uuid,
        university_id: Uuid,
        essay_id: Uuid,
        update: &EssayUpdate,
    ) -> Result<Option<EssayRecord>, AppError> {
        let word_count = update
            .resolved_word_count()
            .map(|n| i32::try_from(n).unwrap_or(i32::MAX));

        let row = sqlx::query_as::<_, EssayRow>(
            r#"
            UPDATE essays SET
                content = COALESCE($1, content),
                word_count = COALESCE($2, word_count),
                status = COALESCE($3, status),
                is_completed = COALESCE($4, is_completed),
                updated_at = now()
            WHERE id = $5 AND user_id = $6 AND university_id = $7
            RETURNING *
            "#,
        )
        .bind(update.content.as_deref())
        .bind(word_count)
        .bind(update.status.map(|s| s.as_str()))
        .bind(update.is_completed)
        .bind(essay_id)
        .bind(user_id)
        .bind(university_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(EssayRow::to_record))
    }

    async fn set_task_completed(
        &self,
        user_id: Uuid,
        university_id: Uuid,
        task_id: Uuid,
        completed: bool,
    ) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT * FROM tasks
            WHERE id = $1 AND user_id = $2 AND university_id = $3
            FOR UPDATE
            "#,
        )
        .bind(task_id)
        .bind(user_id)
        .bind(university_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(false);
        };

        let mut record = row.to_record();
        record.set_completed(completed);

        sqlx::query("UPDATE tasks SET status = $1, completion_status = $2 WHERE id = $3")
            .bind(record.status.as_deref())
            .bind(record.completion_status.as_deref())
            .bind(row.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!("task {task_id}: completed={completed}");
        Ok(true)
    }
}
