use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    NotFound,
    InvalidSetting,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("Please provide completion notes")]
    MissingCompletionNotes,
    #[error("Please select a queue to forward to")]
    MissingForwardQueue,
    #[error("unknown subcategory '{0}'")]
    UnknownSubcategory(String),
    #[error("no order with id '{0}'")]
    UnknownOrder(String),
    #[error("no task is open")]
    NoOpenTask,
    #[error("invalid setting {key}: {message}")]
    InvalidSetting { key: String, message: String },
}

impl DashboardError {
    pub fn invalid_setting(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DashboardError::MissingCompletionNotes | DashboardError::MissingForwardQueue => {
                ErrorCode::Validation
            }
            DashboardError::UnknownSubcategory(_)
            | DashboardError::UnknownOrder(_)
            | DashboardError::NoOpenTask => {
                ErrorCode::NotFound
            }
            DashboardError::InvalidSetting { .. } => ErrorCode::InvalidSetting,
        }
    }

    /// Validation failures block a form locally and leave all state untouched.
    pub fn is_validation(&self) -> bool {
        self.code() == ErrorCode::Validation
    }
}

/// Serializable form of a [`DashboardError`] for machine-readable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&DashboardError> for ErrorReport {
    fn from(value: &DashboardError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_guards_are_validation_errors() {
        assert!(DashboardError::MissingCompletionNotes.is_validation());
        assert!(DashboardError::MissingForwardQueue.is_validation());
        assert!(!DashboardError::UnknownOrder("ORD-1".into()).is_validation());
    }

    #[test]
    fn report_carries_code_and_display_message() {
        let report = ErrorReport::from(&DashboardError::invalid_setting(
            "default_tab",
            "expected on-track, delayed or stuck",
        ));
        assert_eq!(report.code, ErrorCode::InvalidSetting);
        assert_eq!(
            report.message,
            "invalid setting default_tab: expected on-track, delayed or stuck"
        );
        assert_eq!(
            serde_json::to_value(&report).expect("json")["code"],
            "invalid_setting"
        );
    }
}
