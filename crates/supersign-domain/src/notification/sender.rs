use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A rendered push: short title plus markdown body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    pub title: String,
    pub desp: String,
}

impl PushMessage {
    pub fn new(title: impl Into<String>, desp: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            desp: desp.into(),
        }
    }
}

/// Receipt for a delivery the provider accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushReceipt {
    pub status_code: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum PushError {
    /// The transport endpoint could not be reached.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered and refused the push.
    #[error("push rejected (HTTP {status_code}): {message}")]
    Rejected { status_code: u16, message: String },
}

/// Delivery port for the single webhook transport.
#[async_trait]
pub trait PushSender: Send + Sync {
    /// Deliver one message to the destination key. Implementations retry
    /// transient failures internally and return the last error once the
    /// attempt budget is spent.
    async fn send(&self, sendkey: &str, message: &PushMessage) -> Result<PushReceipt, PushError>;
}
