use serde::{Deserialize, Serialize};

/// One checkin-able super topic, discovered fresh each run and never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Display name shown in reports.
    pub title: String,
    /// Opaque target identifier the checkin call is addressed to.
    pub container_id: String,
    /// Protocol-specific action reference (scheme URL, follow-up request
    /// descriptor, or relative path depending on the strategy).
    pub action: String,
}

impl Topic {
    pub fn new(
        title: impl Into<String>,
        container_id: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            container_id: container_id.into(),
            action: action.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckinStatus {
    Success,
    Already,
    Failed,
}

impl CheckinStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckinStatus::Success => "success",
            CheckinStatus::Already => "already",
            CheckinStatus::Failed => "failed",
        }
    }

    /// Icon used in reports and log lines.
    pub fn icon(&self) -> &'static str {
        match self {
            CheckinStatus::Success => "✅",
            CheckinStatus::Already => "☑️",
            CheckinStatus::Failed => "❌",
        }
    }
}

/// Result of one topic's checkin attempt. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinOutcome {
    pub status: CheckinStatus,
    /// Diagnostic text from the target service or from local error handling.
    pub detail: String,
}

impl CheckinOutcome {
    pub fn success(detail: impl Into<String>) -> Self {
        Self {
            status: CheckinStatus::Success,
            detail: detail.into(),
        }
    }

    pub fn already(detail: impl Into<String>) -> Self {
        Self {
            status: CheckinStatus::Already,
            detail: detail.into(),
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            status: CheckinStatus::Failed,
            detail: detail.into(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == CheckinStatus::Failed
    }
}
