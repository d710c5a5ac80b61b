use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::account::CookieBundle;

/// Identity attached to a live session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub uid: String,
    pub screen_name: String,
}

/// Outcome of a credential probe. Transport failures, non-2xx responses and
/// an explicit not-logged-in flag all read as `Invalid`; the probe never
/// errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Valid(SessionIdentity),
    Invalid,
}

impl SessionState {
    pub fn is_valid(&self) -> bool {
        matches!(self, SessionState::Valid(_))
    }

    pub fn identity(&self) -> Option<&SessionIdentity> {
        match self {
            SessionState::Valid(identity) => Some(identity),
            SessionState::Invalid => None,
        }
    }
}

#[async_trait]
pub trait SessionProbe: Send + Sync {
    /// One lightweight probe against the session introspection endpoint.
    /// An incomplete bundle is `Invalid` without touching the network.
    /// A single probe is authoritative for a run; no retries here.
    async fn probe(&self, credentials: &CookieBundle) -> SessionState;
}
