use serde::{Deserialize, Serialize};

use crate::progress::models::{ApplicationStatus, ProgressSummary};

/// Dashboard-level roll-up across every university the user added.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_universities: usize,
    pub overall_progress: u32,
    pub completed_essays: usize,
    pub total_essays: usize,
    pub completed_tasks: usize,
    pub total_tasks: usize,
    pub upcoming_deadlines: usize,
    pub overdue_events: usize,
    pub not_started: usize,
    pub in_progress: usize,
    pub submitted: usize,
}

/// Sums counts across universities; `overall_progress` is the rounded mean of
/// each university's overall progress.
pub fn summarize_dashboard(summaries: &[ProgressSummary]) -> DashboardSummary {
    let mut dashboard = DashboardSummary {
        total_universities: summaries.len(),
        ..Default::default()
    };

    let mut progress_sum = 0u64;
    for s in summaries {
        progress_sum += u64::from(s.overall_progress);
        dashboard.completed_essays += s.completed_essays;
        dashboard.total_essays += s.total_essays;
        dashboard.completed_tasks += s.completed_tasks;
        dashboard.total_tasks += s.total_tasks;
        dashboard.upcoming_deadlines += s.upcoming_deadlines;
        dashboard.overdue_events += s.overdue_events;
        match s.application_status {
            ApplicationStatus::NotStarted => dashboard.not_started += 1,
            ApplicationStatus::InProgress => dashboard.in_progress += 1,
            ApplicationStatus::Submitted => dashboard.submitted += 1,
        }
    }

    if !summaries.is_empty() {
        dashboard.overall_progress =
            (progress_sum as f64 / summaries.len() as f64).round() as u32;
    }

    dashboard
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(overall: u32, status: ApplicationStatus) -> ProgressSummary {
        ProgressSummary {
            overall_progress: overall,
            essay_progress: overall,
            completed_essays: 1,
            total_essays: 2,
            completed_tasks: 1,
            total_tasks: 3,
            application_status: status,
            upcoming_deadlines: 2,
            overdue_events: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_dashboard() {
        assert_eq!(summarize_dashboard(&[]), DashboardSummary::default());
    }

    #[test]
    fn test_rollup_sums_and_averages() {
        let d = summarize_dashboard(&[
            summary(100, ApplicationStatus::Submitted),
            summary(65, ApplicationStatus::InProgress),
            summary(0, ApplicationStatus::NotStarted),
        ]);
        assert_eq!(d.total_universities, 3);
        // (100 + 65 + 0) / 3 = 55
        assert_eq!(d.overall_progress, 55);
        assert_eq!(d.completed_essays, 3);
        assert_eq!(d.total_essays, 6);
        assert_eq!(d.completed_tasks, 3);
        assert_eq!(d.total_tasks, 9);
        assert_eq!(d.upcoming_deadlines, 6);
        assert_eq!(d.overdue_events, 3);
        assert_eq!((d.not_started, d.in_progress, d.submitted), (1, 1, 1));
    }

    #[test]
    fn test_mean_is_rounded() {
        let d = summarize_dashboard(&[
            summary(50, ApplicationStatus::InProgress),
            summary(51, ApplicationStatus::InProgress),
        ]);
        assert_eq!(d.overall_progress, 51);
    }
}
