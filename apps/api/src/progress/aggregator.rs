//! Per-university progress aggregation.
//!
//! Folds essays (prompts plus custom essays) and tasks (calendar events plus
//! tasks) into a `ProgressSummary`. Nothing here touches I/O; the same input
//! and reference instant always produce the same summary.

use chrono::{DateTime, Utc};

use crate::progress::models::{
    ApplicationStatus, EssayRecord, ProgressSource, ProgressSummary, TaskOrEvent,
    UniversitySummary,
};

/// Share of the word limit at which an essay counts as done on the dashboard.
pub const ESSAY_COMPLETION_THRESHOLD: f64 = 0.98;

const ESSAY_WEIGHT: f64 = 0.7;
const TASK_WEIGHT: f64 = 0.3;

/// Aggregates against the current time.
pub fn aggregate(source: Option<&ProgressSource>, custom_essays: &[EssayRecord]) -> ProgressSummary {
    aggregate_at(source, custom_essays, Utc::now())
}

/// Aggregates against an explicit reference instant, used for the
/// upcoming/overdue split.
pub fn aggregate_at(
    source: Option<&ProgressSource>,
    custom_essays: &[EssayRecord],
    now: DateTime<Utc>,
) -> ProgressSummary {
    match source {
        None => ProgressSummary::default(),
        Some(ProgressSource::Precomputed(stats)) => ProgressSummary::from(stats),
        Some(ProgressSource::Raw(university)) => aggregate_raw(university, custom_essays, now),
    }
}

/// Lenient completion used for counting: explicit completion, or at least
/// 98% of the word limit written.
pub fn counts_as_completed(essay: &EssayRecord) -> bool {
    if essay.is_explicitly_completed() {
        return true;
    }
    essay.word_count as f64 >= essay.word_limit as f64 * ESSAY_COMPLETION_THRESHOLD
}

fn aggregate_raw(
    university: &UniversitySummary,
    custom_essays: &[EssayRecord],
    now: DateTime<Utc>,
) -> ProgressSummary {
    // Prompts and custom essays are concatenated as-is; an essay present in
    // both lists is counted twice.
    let all_essays = university.essay_prompts.iter().chain(custom_essays.iter());
    let all_tasks: Vec<&TaskOrEvent> = university
        .calendar_events
        .iter()
        .chain(university.tasks_and_events.iter())
        .collect();

    let (completed_essays, total_essays) = all_essays.fold((0usize, 0usize), |(done, total), e| {
        (done + usize::from(counts_as_completed(e)), total + 1)
    });

    let total_tasks = all_tasks.len();
    let completed_tasks = all_tasks.iter().filter(|t| t.is_completed()).count();

    let upcoming_deadlines = all_tasks
        .iter()
        .filter(|t| !t.is_completed() && t.date > now)
        .count();
    let overdue_events = all_tasks
        .iter()
        .filter(|t| !t.is_completed() && t.date < now)
        .count();

    let essay_progress = percent(completed_essays, total_essays);
    let task_progress = percent(completed_tasks, total_tasks);

    let overall_progress = match (total_essays > 0, total_tasks > 0) {
        (true, true) => {
            (essay_progress as f64 * ESSAY_WEIGHT + task_progress as f64 * TASK_WEIGHT).round()
                as u32
        }
        (true, false) => essay_progress,
        (false, true) => task_progress,
        (false, false) => 0,
    };

    let application_status =
        derive_status(completed_essays, total_essays, completed_tasks, total_tasks);

    ProgressSummary {
        overall_progress,
        essay_progress,
        task_progress,
        completed_essays,
        total_essays,
        completed_tasks,
        total_tasks,
        application_status,
        upcoming_deadlines,
        overdue_events,
    }
}

fn percent(done: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (done as f64 / total as f64 * 100.0).round() as u32
}

fn derive_status(
    completed_essays: usize,
    total_essays: usize,
    completed_tasks: usize,
    total_tasks: usize,
) -> ApplicationStatus {
    if completed_essays == 0 && completed_tasks == 0 {
        ApplicationStatus::NotStarted
    } else if completed_essays == total_essays
        && completed_tasks == total_tasks
        && (total_essays > 0 || total_tasks > 0)
    {
        ApplicationStatus::Submitted
    } else {
        ApplicationStatus::InProgress
    }
}
