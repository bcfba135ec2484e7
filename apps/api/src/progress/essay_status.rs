use serde::{Deserialize, Serialize};

use crate::progress::models::{EssayRecord, EssayStatus};

/// Display status shown next to an essay.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DisplayStatus {
    Completed,
    #[serde(rename = "In Progress")]
    InProgress,
    Draft,
    #[serde(rename = "Not Started")]
    NotStarted,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EssayClassification {
    pub status: DisplayStatus,
    pub progress_percent: u32,
}

/// Derives the display status and progress bar value for a single essay.
///
/// Rules, first match wins:
/// 1. explicit `COMPLETED` status or completion flag → Completed, 100
/// 2. `IN_PROGRESS` status or any words written → In Progress, word ratio capped at 100
/// 3. `DRAFT` status → Draft, 0
/// 4. otherwise → Not Started, 0
///
/// Unlike the aggregator this never treats a full word count as completion.
pub fn classify(essay: &EssayRecord) -> EssayClassification {
    if essay.is_explicitly_completed() {
        return EssayClassification {
            status: DisplayStatus::Completed,
            progress_percent: 100,
        };
    }

    if essay.status == Some(EssayStatus::InProgress) || essay.word_count > 0 {
        return EssayClassification {
            status: DisplayStatus::InProgress,
            progress_percent: word_ratio_percent(essay.word_count, essay.word_limit),
        };
    }

    let status = match essay.status {
        Some(EssayStatus::Draft) => DisplayStatus::Draft,
        _ => DisplayStatus::NotStarted,
    };

    EssayClassification {
        status,
        progress_percent: 0,
    }
}

/// `round(min(count / limit, 1) * 100)`, or 0 when either side is zero.
fn word_ratio_percent(word_count: u32, word_limit: u32) -> u32 {
    if word_count == 0 || word_limit == 0 {
        return 0;
    }
    let ratio = (word_count as f64 / word_limit as f64).min(1.0);
    (ratio * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::models::Priority;

    fn essay(word_count: u32, word_limit: u32, status: Option<EssayStatus>) -> EssayRecord {
        EssayRecord {
            id: "essay-1".to_string(),
            title: "Leadership".to_string(),
            prompt: "Describe a time you led a team.".to_string(),
            word_count,
            word_limit,
            status,
            is_completed: None,
            priority: Priority::High,
        }
    }

    #[test]
    fn test_explicit_completed_is_full() {
        let c = classify(&essay(10, 500, Some(EssayStatus::Completed)));
        assert_eq!(c.status, DisplayStatus::Completed);
        assert_eq!(c.progress_percent, 100);
    }

    #[test]
    fn test_completion_flag_is_full() {
        let mut e = essay(0, 500, Some(EssayStatus::Draft));
        e.is_completed = Some(true);
        assert_eq!(
            classify(&e),
            EssayClassification {
                status: DisplayStatus::Completed,
                progress_percent: 100
            }
        );
    }

    #[test]
    fn test_words_written_means_in_progress() {
        let c = classify(&essay(250, 500, None));
        assert_eq!(c.status, DisplayStatus::InProgress);
        assert_eq!(c.progress_percent, 50);
    }

    #[test]
    fn test_words_override_draft_status() {
        // A draft with words is shown as in progress; words win over DRAFT.
        let c = classify(&essay(100, 400, Some(EssayStatus::Draft)));
        assert_eq!(c.status, DisplayStatus::InProgress);
        assert_eq!(c.progress_percent, 25);
    }

    #[test]
    fn test_near_limit_is_not_completed() {
        let c = classify(&essay(490, 500, None));
        assert_eq!(c.status, DisplayStatus::InProgress);
        assert_eq!(c.progress_percent, 98);
    }

    #[test]
    fn test_full_word_count_without_status_stays_in_progress() {
        let c = classify(&essay(500, 500, None));
        assert_eq!(c.status, DisplayStatus::InProgress);
        assert_eq!(c.progress_percent, 100);
    }

    #[test]
    fn test_over_limit_is_capped() {
        assert_eq!(classify(&essay(900, 500, None)).progress_percent, 100);
    }

    #[test]
    fn test_zero_limit_never_divides() {
        for words in [0, 1, 250, 10_000] {
            let c = classify(&essay(words, 0, None));
            assert_eq!(c.progress_percent, 0, "word_count {words}");
        }
        let c = classify(&essay(300, 0, Some(EssayStatus::InProgress)));
        assert_eq!(c.status, DisplayStatus::InProgress);
        assert_eq!(c.progress_percent, 0);
    }

    #[test]
    fn test_in_progress_status_without_words() {
        let c = classify(&essay(0, 500, Some(EssayStatus::InProgress)));
        assert_eq!(c.status, DisplayStatus::InProgress);
        assert_eq!(c.progress_percent, 0);
    }

    #[test]
    fn test_draft_without_words() {
        let c = classify(&essay(0, 500, Some(EssayStatus::Draft)));
        assert_eq!(c.status, DisplayStatus::Draft);
        assert_eq!(c.progress_percent, 0);
    }

    #[test]
    fn test_untouched_is_not_started() {
        for status in [None, Some(EssayStatus::NotStarted)] {
            let c = classify(&essay(0, 500, status));
            assert_eq!(c.status, DisplayStatus::NotStarted);
            assert_eq!(c.progress_percent, 0);
        }
    }

    #[test]
    fn test_display_labels() {
        let v = serde_json::to_value(classify(&essay(1, 500, None))).unwrap();
        assert_eq!(v["status"], "In Progress");
        assert_eq!(v["progressPercent"], 0);
    }
}
