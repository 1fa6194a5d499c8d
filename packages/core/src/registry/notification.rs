//! Operator-facing notifications raised by the registry controller

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const FETCH_FAILED: &str = "Failed to fetch territorial registry";
pub const CATEGORIES_FAILED: &str = "Failed to load categories";
pub const LOOKUP_FAILED: &str = "Failed to load lookup values";
pub const CREATE_FAILED: &str = "Create failed";
pub const UPDATE_FAILED: &str = "Update failed";
pub const DELETE_FAILED: &str = "Delete failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    /// Failure the command recovered from
    Warning,
    Error,
}

/// One message for the operator; errors carry a fixed text, the cause goes
/// to the log
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            raised_at: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            raised_at: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// Yes/no gate in front of destructive actions
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}
