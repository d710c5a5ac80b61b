use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::AccountId;

/// One observability record. The datastore owning these lives outside this
/// system; entries only flow out through the repository port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskLogEntry {
    id: String,
    account_id: Option<AccountId>,
    /// `checkin`, `cookie_invalid`, `cookie_update`, or `push_{category}`
    /// for dispatch attempts.
    event_type: String,
    /// `success`, `partial`, `fail`, or `skip`.
    status: String,
    message: String,
    detail: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
}

impl TaskLogEntry {
    pub fn new(
        account_id: Option<AccountId>,
        event_type: impl Into<String>,
        status: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account_id,
            event_type: event_type.into(),
            status: status.into(),
            message: message.into(),
            detail: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn account_id(&self) -> Option<&AccountId> {
        self.account_id.as_ref()
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn detail(&self) -> Option<&serde_json::Value> {
        self.detail.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
