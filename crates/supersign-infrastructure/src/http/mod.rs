mod cardlist;
mod mobile_web;
mod probe;
mod shared;
mod topicsub;

pub use cardlist::CardlistStrategy;
pub use mobile_web::MobileWebStrategy;
pub use probe::WeiboSessionProbe;
pub use topicsub::TopicsubStrategy;

use anyhow::Result;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;

use supersign_domain::account::CookieBundle;
use supersign_domain::checkin::{CheckinStrategy, StrategyFactory, StrategyKind};

use crate::config::TimeoutConfig;
use shared::WeiboApi;

/// Builds the configured wire-protocol adapter per account. One shared
/// reqwest client backs every adapter; the cookie header is the only
/// per-account state.
pub struct WeiboStrategyFactory {
    client: Client,
    kind: StrategyKind,
    api_params: HashMap<String, String>,
    timeouts: TimeoutConfig,
}

impl WeiboStrategyFactory {
    pub fn new(
        kind: StrategyKind,
        api_params: HashMap<String, String>,
        timeouts: TimeoutConfig,
    ) -> Result<Self> {
        Ok(Self {
            client: shared::build_http_client()?,
            kind,
            api_params,
            timeouts,
        })
    }
}

impl StrategyFactory for WeiboStrategyFactory {
    fn for_credentials(&self, credentials: &CookieBundle) -> Arc<dyn CheckinStrategy> {
        let api = WeiboApi::new(
            self.client.clone(),
            credentials,
            &self.api_params,
            self.timeouts.clone(),
        );

        match self.kind {
            StrategyKind::Cardlist => Arc::new(CardlistStrategy::new(api)),
            StrategyKind::Topicsub => Arc::new(TopicsubStrategy::new(api)),
            StrategyKind::MobileWeb => Arc::new(MobileWebStrategy::new(api)),
        }
    }
}
