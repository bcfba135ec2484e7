//! Persistence seam for the progress core.
//!
//! Handlers only see `ApplicationStore`; `AppState` carries an
//! `Arc<dyn ApplicationStore>` so tests can swap in the in-memory store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::essays::EssayUpdate;
use crate::progress::models::{EssayRecord, UniversitySummary};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgApplicationStore;

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn university_exists(&self, university_id: Uuid) -> Result<bool, AppError>;

    async fn is_university_added(&self, user_id: Uuid, university_id: Uuid)
        -> Result<bool, AppError>;

    /// Puts a university on the user's dashboard. Returns `false` if it was
    /// already there.
    async fn add_university(&self, user_id: Uuid, university_id: Uuid) -> Result<bool, AppError>;

    async fn added_universities(&self, user_id: Uuid) -> Result<Vec<Uuid>, AppError>;

    /// Snapshot of one university for aggregation, or `None` if the user has
    /// not added it. Custom essays are not included.
    async fn load_university(
        &self,
        user_id: Uuid,
        university_id: Uuid,
    ) -> Result<Option<UniversitySummary>, AppError>;

    async fn load_custom_essays(
        &self,
        user_id: Uuid,
        university_id: Uuid,
    ) -> Result<Vec<EssayRecord>, AppError>;

    /// Looks up a prompt essay or a custom essay.
    async fn find_essay(
        &self,
        user_id: Uuid,
        university_id: Uuid,
        essay_id: Uuid,
    ) -> Result<Option<EssayRecord>, AppError>;

    async fn update_essay(
        &self,
        user_id: Uuid,
        university_id: Uuid,
        essay_id: Uuid,
        update: &EssayUpdate,
    ) -> Result<Option<EssayRecord>, AppError>;

    /// Returns `false` if no such task exists for the user and university.
    async fn set_task_completed(
        &self,
        user_id: Uuid,
        university_id: Uuid,
        task_id: Uuid,
        completed: bool,
    ) -> Result<bool, AppError>;
}
