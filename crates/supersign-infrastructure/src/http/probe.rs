use anyhow::Result;
use async_trait::async_trait;
use log::{error, info};
use reqwest::{header, Client};
use serde_json::Value;
use std::time::Duration;

use supersign_domain::account::CookieBundle;
use supersign_domain::session::{SessionIdentity, SessionProbe, SessionState};

use super::shared::{build_http_client, json_text};
use crate::config::TimeoutConfig;

const CONFIG_URL: &str = "https://m.weibo.cn/api/config";

/// Session probe against the mobile-web config endpoint.
pub struct WeiboSessionProbe {
    client: Client,
    timeout: Duration,
}

impl WeiboSessionProbe {
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
            timeout: timeouts.probe,
        })
    }

    async fn probe_once(&self, credentials: &CookieBundle) -> Result<Value> {
        let response = self
            .client
            .get(CONFIG_URL)
            .timeout(self.timeout)
            .header(header::COOKIE, credentials.header_value())
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

#[async_trait]
impl SessionProbe for WeiboSessionProbe {
    async fn probe(&self, credentials: &CookieBundle) -> SessionState {
        if !credentials.is_complete() {
            return SessionState::Invalid;
        }

        let data = match self.probe_once(credentials).await {
            Ok(data) => data,
            Err(e) => {
                error!("Cookie probe failed: {}", e);
                return SessionState::Invalid;
            }
        };

        let config = &data["data"];
        if config["login"].as_bool() != Some(true) {
            return SessionState::Invalid;
        }

        // uid is a number or a string depending on client version
        let identity = SessionIdentity {
            uid: json_text(&config["uid"]),
            screen_name: config["user"]["screen_name"]
                .as_str()
                .unwrap_or("")
                .to_string(),
        };
        info!("Cookie valid, uid={}", identity.uid);
        SessionState::Valid(identity)
    }
}
