use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::value_objects::{CheckinOutcome, Topic};
use crate::account::CookieBundle;

/// Errors surfaced while listing topics. Checkin submission never errors;
/// it degrades to a failed `CheckinOutcome` instead.
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    /// The endpoint could not be reached or the response body never arrived.
    #[error("transport error: {0}")]
    Transport(String),

    /// The endpoint answered but the payload was unusable (non-2xx status,
    /// unparseable body, missing fields).
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Wire-protocol variant used for one run. Selection is static per run;
/// there is no fallback between kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Cardlist,
    Topicsub,
    MobileWeb,
}

impl StrategyKind {
    /// `topicsub` and `mobileweb` are recognized; anything else, including
    /// an empty value, selects cardlist.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "topicsub" => StrategyKind::Topicsub,
            "mobileweb" => StrategyKind::MobileWeb,
            _ => StrategyKind::Cardlist,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Cardlist => "cardlist",
            StrategyKind::Topicsub => "topicsub",
            StrategyKind::MobileWeb => "mobileweb",
        }
    }
}

/// Capability set every wire-protocol variant implements.
#[async_trait]
pub trait CheckinStrategy: Send + Sync {
    /// Page through the followed super topics until the service returns an
    /// empty page or repeats the pagination cursor. Items without an
    /// extractable container id are dropped with a diagnostic.
    async fn list_topics(&self) -> Result<Vec<Topic>, StrategyError>;

    /// Submit one checkin for `topic`. Transport failures are folded into a
    /// failed outcome carrying the error text.
    async fn checkin(&self, topic: &Topic) -> CheckinOutcome;
}

/// Builds the configured wire-protocol adapter for one account's
/// credentials. The orchestrator constructs a fresh adapter per run so
/// strategies stay free of cross-account state.
pub trait StrategyFactory: Send + Sync {
    fn for_credentials(&self, credentials: &CookieBundle) -> Arc<dyn CheckinStrategy>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_recognizes_variants() {
        assert_eq!(StrategyKind::parse("topicsub"), StrategyKind::Topicsub);
        assert_eq!(StrategyKind::parse("mobileweb"), StrategyKind::MobileWeb);
        assert_eq!(StrategyKind::parse("cardlist"), StrategyKind::Cardlist);
    }

    #[test]
    fn test_kind_parse_defaults_to_cardlist() {
        assert_eq!(StrategyKind::parse(""), StrategyKind::Cardlist);
        assert_eq!(StrategyKind::parse("unknown"), StrategyKind::Cardlist);
        assert_eq!(StrategyKind::parse("  topicsub  "), StrategyKind::Topicsub);
    }
}
