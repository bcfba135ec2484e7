use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Essays
// ────────────────────────────────────────────────────────────────────────────

/// Stored workflow status of an essay.
///
/// Accepts both the persisted upper-snake form (`IN_PROGRESS`) and the
/// kebab form the UI sends (`in-progress`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EssayStatus {
    #[serde(alias = "completed")]
    Completed,
    #[serde(alias = "in-progress")]
    InProgress,
    #[serde(alias = "draft")]
    Draft,
    #[serde(alias = "not-started")]
    NotStarted,
}

impl EssayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EssayStatus::Completed => "COMPLETED",
            EssayStatus::InProgress => "IN_PROGRESS",
            EssayStatus::Draft => "DRAFT",
            EssayStatus::NotStarted => "NOT_STARTED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown essay status '{0}'")]
pub struct UnknownEssayStatus(pub String);

impl FromStr for EssayStatus {
    type Err = UnknownEssayStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COMPLETED" | "completed" => Ok(EssayStatus::Completed),
            "IN_PROGRESS" | "in-progress" => Ok(EssayStatus::InProgress),
            "DRAFT" | "draft" => Ok(EssayStatus::Draft),
            "NOT_STARTED" | "not-started" => Ok(EssayStatus::NotStarted),
            other => Err(UnknownEssayStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Lenient parse for stored values; anything unrecognised is `Medium`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "low" => Priority::Low,
            "high" => Priority::High,
            _ => Priority::Medium,
        }
    }
}

/// A university essay prompt or a custom essay, as the UI and the store see it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EssayRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub word_count: u32,
    #[serde(default)]
    pub word_limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EssayStatus>,
    #[serde(default, alias = "isComplete", skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(default)]
    pub priority: Priority,
}

impl EssayRecord {
    /// Explicit completion: a `COMPLETED` status or the completion flag.
    /// Word counts are deliberately not considered here.
    pub fn is_explicitly_completed(&self) -> bool {
        self.status == Some(EssayStatus::Completed) || self.is_completed == Some(true)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tasks and calendar events
// ────────────────────────────────────────────────────────────────────────────

pub const COMPLETED_MARKER: &str = "completed";
pub const PENDING_MARKER: &str = "pending";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskOrEvent {
    pub id: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_status: Option<String>,
}

impl TaskOrEvent {
    /// The one place that decides whether a task is done. `status` and
    /// `completionStatus` are synonyms; either one marking completion wins.
    pub fn is_completed(&self) -> bool {
        self.completion_status.as_deref() == Some(COMPLETED_MARKER)
            || self.status.as_deref() == Some(COMPLETED_MARKER)
    }

    /// Marks the task done or reopens it. Reopening clears both synonyms so
    /// neither keeps the task completed.
    pub fn set_completed(&mut self, completed: bool) {
        if completed {
            self.completion_status = Some(COMPLETED_MARKER.to_string());
            return;
        }
        self.completion_status = Some(PENDING_MARKER.to_string());
        if self.status.as_deref() == Some(COMPLETED_MARKER) {
            self.status = None;
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Universities and summaries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ApplicationStatus {
    #[default]
    NotStarted,
    InProgress,
    Submitted,
}

/// Progress figures for one university.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub overall_progress: u32,
    pub essay_progress: u32,
    pub task_progress: u32,
    pub completed_essays: usize,
    pub total_essays: usize,
    pub completed_tasks: usize,
    pub total_tasks: usize,
    pub application_status: ApplicationStatus,
    pub upcoming_deadlines: usize,
    pub overdue_events: usize,
}

/// Server-precomputed summary attached to a university record.
/// Any field may be missing; missing numbers read as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedStats {
    #[serde(default)]
    pub overall_progress: Option<u32>,
    #[serde(default)]
    pub essay_progress: Option<u32>,
    #[serde(default)]
    pub task_progress: Option<u32>,
    #[serde(default)]
    pub completed_essays: Option<usize>,
    #[serde(default)]
    pub total_essays: Option<usize>,
    #[serde(default)]
    pub completed_tasks: Option<usize>,
    #[serde(default)]
    pub total_tasks: Option<usize>,
    #[serde(default)]
    pub application_status: Option<ApplicationStatus>,
    #[serde(default)]
    pub upcoming_deadlines: Option<usize>,
    #[serde(default)]
    pub overdue_events: Option<usize>,
}

impl From<&EnhancedStats> for ProgressSummary {
    fn from(stats: &EnhancedStats) -> Self {
        ProgressSummary {
            overall_progress: stats.overall_progress.unwrap_or(0),
            essay_progress: stats.essay_progress.unwrap_or(0),
            task_progress: stats.task_progress.unwrap_or(0),
            completed_essays: stats.completed_essays.unwrap_or(0),
            total_essays: stats.total_essays.unwrap_or(0),
            completed_tasks: stats.completed_tasks.unwrap_or(0),
            total_tasks: stats.total_tasks.unwrap_or(0),
            application_status: stats.application_status.unwrap_or_default(),
            upcoming_deadlines: stats.upcoming_deadlines.unwrap_or(0),
            overdue_events: stats.overdue_events.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UniversitySummary {
    #[serde(default)]
    pub essay_prompts: Vec<EssayRecord>,
    #[serde(default)]
    pub calendar_events: Vec<TaskOrEvent>,
    #[serde(default)]
    pub tasks_and_events: Vec<TaskOrEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhanced_stats: Option<EnhancedStats>,
    // Display hints carried through for the UI; aggregation ignores them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_progress: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub essay_progress: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_progress: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
}

impl UniversitySummary {
    /// Splits the record into the aggregation input. Present enhanced stats
    /// always win over the raw collections.
    pub fn into_source(mut self) -> ProgressSource {
        match self.enhanced_stats.take() {
            Some(stats) => ProgressSource::Precomputed(stats),
            None => ProgressSource::Raw(self),
        }
    }
}

/// What the aggregator works from for a single university.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressSource {
    Precomputed(EnhancedStats),
    Raw(UniversitySummary),
}
