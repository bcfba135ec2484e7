use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// The one action allowed on a university that is not on the dashboard yet.
pub const ADD_UNIVERSITY: &str = "addUniversity";
pub const EDIT_ESSAY: &str = "editEssay";
pub const TOGGLE_TASK: &str = "toggleTask";
pub const ESSAY_FEEDBACK: &str = "essayFeedback";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenial {
    SignInRequired,
    UniversityNotAdded,
}

impl AccessDenial {
    pub fn message(&self) -> &'static str {
        match self {
            AccessDenial::SignInRequired => "Please sign in to continue",
            AccessDenial::UniversityNotAdded => {
                "Please add this university to your dashboard first"
            }
        }
    }
}

/// Result of the access gate. Advisory: the caller decides what to do with a
/// denial.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccessCheck {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub denial: Option<AccessDenial>,
}

impl AccessCheck {
    fn allowed() -> Self {
        Self {
            is_valid: true,
            error: None,
            denial: None,
        }
    }

    fn denied(denial: AccessDenial) -> Self {
        Self {
            is_valid: false,
            error: Some(denial.message().to_string()),
            denial: Some(denial),
        }
    }

    /// Turns a denial into the HTTP error handlers return.
    pub fn into_result(self) -> Result<(), AppError> {
        match self.denial {
            None => Ok(()),
            Some(AccessDenial::SignInRequired) => {
                Err(AppError::Unauthorized(AccessDenial::SignInRequired.message().to_string()))
            }
            Some(AccessDenial::UniversityNotAdded) => Err(AppError::Forbidden(
                AccessDenial::UniversityNotAdded.message().to_string(),
            )),
        }
    }
}

/// Checks whether `user_id` may perform `action` on a university.
///
/// Sign-in is checked first and unconditionally; an empty id counts as
/// missing. Every action except `addUniversity` requires the university to be
/// on the user's dashboard.
pub fn check_access(user_id: Option<&str>, is_university_added: bool, action: &str) -> AccessCheck {
    if user_id.map_or(true, |id| id.trim().is_empty()) {
        return AccessCheck::denied(AccessDenial::SignInRequired);
    }

    if action != ADD_UNIVERSITY && !is_university_added {
        return AccessCheck::denied(AccessDenial::UniversityNotAdded);
    }

    AccessCheck::allowed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_user_is_rejected_first() {
        let check = check_access(None, true, "edit");
        assert!(!check.is_valid);
        assert_eq!(check.error.as_deref(), Some("Please sign in to continue"));

        // Even an add request on an unadded university needs a user.
        let check = check_access(None, false, ADD_UNIVERSITY);
        assert_eq!(check.denial, Some(AccessDenial::SignInRequired));
    }

    #[test]
    fn test_empty_user_counts_as_missing() {
        let check = check_access(Some(""), true, EDIT_ESSAY);
        assert_eq!(check.denial, Some(AccessDenial::SignInRequired));
    }

    #[test]
    fn test_unadded_university_is_locked() {
        let check = check_access(Some("u1"), false, "edit");
        assert!(!check.is_valid);
        assert_eq!(
            check.error.as_deref(),
            Some("Please add this university to your dashboard first")
        );
    }

    #[test]
    fn test_add_university_is_always_allowed_for_signed_in_user() {
        let check = check_access(Some("u1"), false, ADD_UNIVERSITY);
        assert!(check.is_valid);
        assert!(check.error.is_none());
        assert!(check_access(Some("u1"), true, ADD_UNIVERSITY).is_valid);
    }

    #[test]
    fn test_added_university_unlocks_everything() {
        for action in [EDIT_ESSAY, TOGGLE_TASK, ESSAY_FEEDBACK, "anythingElse"] {
            assert!(check_access(Some("u1"), true, action).is_valid, "{action}");
        }
    }

    #[test]
    fn test_serialized_shape() {
        let denied = serde_json::to_value(check_access(Some("u1"), false, EDIT_ESSAY)).unwrap();
        assert_eq!(denied["isValid"], false);
        assert_eq!(
            denied["error"],
            "Please add this university to your dashboard first"
        );

        let allowed = serde_json::to_value(check_access(Some("u1"), true, EDIT_ESSAY)).unwrap();
        assert_eq!(allowed, serde_json::json!({ "isValid": true }));
    }

    #[test]
    fn test_into_result_maps_to_http_errors() {
        assert!(check_access(Some("u1"), true, EDIT_ESSAY).into_result().is_ok());
        assert!(matches!(
            check_access(None, true, EDIT_ESSAY).into_result(),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            check_access(Some("u1"), false, EDIT_ESSAY).into_result(),
            Err(AppError::Forbidden(_))
        ));
    }
}
