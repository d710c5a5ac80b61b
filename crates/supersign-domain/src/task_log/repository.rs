use async_trait::async_trait;

use super::types::TaskLogEntry;
use crate::shared::DomainError;

#[async_trait]
pub trait TaskLogRepository: Send + Sync {
    /// Append one entry. Entries are immutable once written.
    async fn append(&self, entry: TaskLogEntry) -> Result<(), DomainError>;

    /// Most recent entries, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<TaskLogEntry>, DomainError>;
}
