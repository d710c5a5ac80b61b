use serde::{Deserialize, Serialize};

use super::value_objects::{CheckinOutcome, CheckinStatus};

/// Terminal status of one run. Persisted on the account as the last-run
/// status; an account that has never run carries no status at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Success,
    Partial,
    Failed,
    CredentialInvalid,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Success => "success",
            RunStatus::Partial => "partial",
            RunStatus::Failed => "fail",
            RunStatus::CredentialInvalid => "cookie_invalid",
        }
    }
}

/// One row of the per-topic breakdown, in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicOutcome {
    pub name: String,
    pub status: CheckinStatus,
    pub detail: String,
}

/// Aggregate outcome of one run across all discovered topics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub success: usize,
    pub already: usize,
    pub failed: usize,
    /// `{title}: {detail}` lines for failed topics.
    pub failed_items: Vec<String>,
    /// Ordered per-topic outcomes.
    pub details: Vec<TopicOutcome>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one topic's outcome into the summary. Call in processing order;
    /// `details` preserves it.
    pub fn record(&mut self, title: &str, outcome: &CheckinOutcome) {
        self.total += 1;
        match outcome.status {
            CheckinStatus::Success => self.success += 1,
            CheckinStatus::Already => self.already += 1,
            CheckinStatus::Failed => {
                self.failed += 1;
                self.failed_items
                    .push(format!("{}: {}", title, outcome.detail));
            }
        }
        self.details.push(TopicOutcome {
            name: title.to_string(),
            status: outcome.status,
            detail: outcome.detail.clone(),
        });
    }

    /// Terminal classification: no failures is `Success`, every topic failed
    /// is `Failed`, anything in between is `Partial`. Zero topics classifies
    /// as `Success` with `total == 0`; callers that need to tell an idle
    /// account from a silently broken listing must inspect `total`.
    pub fn status(&self) -> RunStatus {
        if self.failed == 0 {
            RunStatus::Success
        } else if self.failed == self.total {
            RunStatus::Failed
        } else {
            RunStatus::Partial
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
