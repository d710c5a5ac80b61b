use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;
use std::time::Duration;

use supersign_domain::notification::{PushError, PushMessage, PushReceipt, PushSender};

use crate::config::TimeoutConfig;

const MAX_ATTEMPTS: u32 = 3;

/// ServerChan webhook sender. Transient failures are retried with
/// exponential backoff (2s, 4s, ...) before the last error is returned.
pub struct ServerChanSender {
    client: Client,
    timeout: Duration,
    backoff_base: Duration,
}

impl ServerChanSender {
    pub fn new(timeouts: &TimeoutConfig) -> Self {
        Self {
            client: Client::new(),
            timeout: timeouts.push,
            backoff_base: Duration::from_secs(2),
        }
    }

    /// Shrink the retry backoff, for tests.
    pub fn with_backoff(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    fn build_push_url(&self, sendkey: &str) -> String {
        format!("https://sctapi.ftqq.com/{}.send", sendkey)
    }

    async fn send_once(&self, sendkey: &str, message: &PushMessage) -> Result<PushReceipt, PushError> {
        let url = self.build_push_url(sendkey);
        let form = [
            ("title", message.title.as_str()),
            ("desp", message.desp.as_str()),
            ("noip", "1"),
        ];

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .form(&form)
            .send()
            .await
            .map_err(|e| PushError::Transport(e.to_string()))?;

        let status = response.status();
        let body: serde_json::Value = response.json().await.unwrap_or_default();

        if status.as_u16() == 200 && body["code"].as_i64() == Some(0) {
            return Ok(PushReceipt {
                status_code: status.as_u16(),
            });
        }

        // ServerChan reports the reason under `message` or `info`
        let message = body["message"]
            .as_str()
            .filter(|m| !m.is_empty())
            .or_else(|| body["info"].as_str().filter(|m| !m.is_empty()))
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status));

        Err(PushError::Rejected {
            status_code: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl PushSender for ServerChanSender {
    async fn send(&self, sendkey: &str, message: &PushMessage) -> Result<PushReceipt, PushError> {
        let mut last_error = None;

        for attempt in 1..=MAX_ATTEMPTS {
            match self.send_once(sendkey, message).await {
                Ok(receipt) => {
                    info!("Push delivered (attempt {}/{})", attempt, MAX_ATTEMPTS);
                    return Ok(receipt);
                }
                Err(e) => {
                    warn!("Push attempt {}/{} failed: {}", attempt, MAX_ATTEMPTS, e);
                    last_error = Some(e);
                }
            }

            if attempt < MAX_ATTEMPTS {
                let backoff = self.backoff_base * 2u32.pow(attempt - 1);
                tokio::time::sleep(backoff).await;
            }
        }

        Err(last_error.unwrap_or_else(|| PushError::Transport("no attempt made".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_push_url() {
        let sender = ServerChanSender::new(&TimeoutConfig::default());
        assert_eq!(
            sender.build_push_url("SCT123KEY"),
            "https://sctapi.ftqq.com/SCT123KEY.send"
        );
    }
}
