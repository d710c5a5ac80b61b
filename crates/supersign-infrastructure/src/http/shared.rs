use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

use supersign_domain::account::CookieBundle;
use supersign_domain::checkin::{CheckinOutcome, StrategyError};

use crate::config::TimeoutConfig;

pub(super) const MOBILE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 15_0 like Mac OS X) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) \
     Version/15.0 Mobile/15E148 Safari/604.1";

/// One shared client for every Weibo call; cookies are attached per request,
/// not stored in the client.
pub(super) fn build_http_client() -> Result<Client> {
    Client::builder()
        .user_agent(MOBILE_UA)
        .gzip(true)
        .build()
        .context("Failed to create HTTP client")
}

/// Per-account request state shared by all strategy variants: the cookie
/// header, the operator-captured extra API params, and the timeouts.
pub(super) struct WeiboApi {
    client: Client,
    cookie_header: String,
    api_params: Vec<(String, String)>,
    pub(super) timeouts: TimeoutConfig,
}

impl WeiboApi {
    pub(super) fn new(
        client: Client,
        credentials: &CookieBundle,
        api_params: &HashMap<String, String>,
        timeouts: TimeoutConfig,
    ) -> Self {
        Self {
            client,
            cookie_header: credentials.header_value(),
            api_params: api_params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            timeouts,
        }
    }

    /// GET with the captured params merged into the query string.
    pub(super) async fn get_json(
        &self,
        url: &str,
        params: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<Value, StrategyError> {
        let query = self.merge_params(params);
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .header(header::COOKIE, &self.cookie_header)
            .query(&query)
            .send()
            .await
            .map_err(|e| StrategyError::Transport(e.to_string()))?;

        read_json(response).await
    }

    /// GET a fully-formed URL, no extra params.
    pub(super) async fn get_json_raw(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<Value, StrategyError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .header(header::COOKIE, &self.cookie_header)
            .send()
            .await
            .map_err(|e| StrategyError::Transport(e.to_string()))?;

        read_json(response).await
    }

    /// POST a JSON body, captured params in the query string.
    pub(super) async fn post_json(
        &self,
        url: &str,
        body: &Value,
        timeout: Duration,
    ) -> Result<Value, StrategyError> {
        let query = self.merge_params(&[]);
        let response = self
            .client
            .post(url)
            .timeout(timeout)
            .header(header::COOKIE, &self.cookie_header)
            .query(&query)
            .json(body)
            .send()
            .await
            .map_err(|e| StrategyError::Transport(e.to_string()))?;

        read_json(response).await
    }

    fn merge_params(&self, params: &[(&str, &str)]) -> Vec<(String, String)> {
        let mut merged = self.api_params.clone();
        for (k, v) in params {
            merged.push((k.to_string(), v.to_string()));
        }
        merged
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, StrategyError> {
    let status = response.status();
    if !status.is_success() {
        return Err(StrategyError::Protocol(format!("HTTP {}", status)));
    }
    response
        .json()
        .await
        .map_err(|e| StrategyError::Protocol(format!("unparseable body: {}", e)))
}

/// Text of a JSON field that may arrive as a string, a number, or be absent.
pub(super) fn json_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Classify one checkin response. `numeric_ok` is the variant-specific
/// success indicator; the substring checks cover localized result phrasing.
pub(super) fn classify_checkin(msg: &str, numeric_ok: bool, raw: &Value) -> CheckinOutcome {
    let lower = msg.to_lowercase();
    if lower.contains("已签") || lower.contains("already") {
        CheckinOutcome::already(msg)
    } else if numeric_ok || lower.contains("签到成功") || lower.contains("success") {
        CheckinOutcome::success(msg)
    } else if msg.is_empty() {
        CheckinOutcome::failed(raw.to_string())
    } else {
        CheckinOutcome::failed(msg)
    }
}

/// Pull the container id out of a scheme URL: query first, then fragment,
/// then a raw scan for schemes the URL parser rejects.
pub(super) fn extract_container_id(scheme: &str) -> Option<String> {
    if let Ok(parsed) = Url::parse(scheme) {
        if let Some((_, v)) = parsed.query_pairs().find(|(k, _)| k == "containerid") {
            if !v.is_empty() {
                return Some(v.into_owned());
            }
        }
        if let Some(fragment) = parsed.fragment() {
            for pair in fragment.split('&') {
                if let Some(v) = pair.strip_prefix("containerid=") {
                    if !v.is_empty() {
                        return Some(v.to_string());
                    }
                }
            }
        }
    }

    scheme
        .split_once("containerid=")
        .map(|(_, rest)| rest.split('&').next().unwrap_or("").to_string())
        .filter(|cid| !cid.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use supersign_domain::checkin::CheckinStatus;

    #[test]
    fn test_extract_container_id_from_query() {
        let scheme = "sinaweibo://pageinfo?containerid=1008081234&extparam=seat";
        assert_eq!(extract_container_id(scheme).as_deref(), Some("1008081234"));
    }

    #[test]
    fn test_extract_container_id_from_fragment() {
        let scheme = "https://m.weibo.cn/p/index#containerid=1008085678&luicode=1";
        assert_eq!(extract_container_id(scheme).as_deref(), Some("1008085678"));
    }

    #[test]
    fn test_extract_container_id_raw_scan() {
        // Not a parseable URL at all
        let scheme = "garbage containerid=100808abc&rest";
        assert_eq!(extract_container_id(scheme).as_deref(), Some("100808abc"));
    }

    #[test]
    fn test_extract_container_id_missing() {
        assert_eq!(extract_container_id("sinaweibo://pageinfo?page=1"), None);
        assert_eq!(extract_container_id(""), None);
    }

    #[test]
    fn test_classify_already_beats_numeric_ok() {
        let outcome = classify_checkin("今日已签到", true, &json!({}));
        assert_eq!(outcome.status, CheckinStatus::Already);
    }

    #[test]
    fn test_classify_success_paths() {
        assert_eq!(
            classify_checkin("", true, &json!({})).status,
            CheckinStatus::Success
        );
        assert_eq!(
            classify_checkin("签到成功", false, &json!({})).status,
            CheckinStatus::Success
        );
        assert_eq!(
            classify_checkin("Success!", false, &json!({})).status,
            CheckinStatus::Success
        );
    }

    #[test]
    fn test_classify_failure_keeps_raw_body_when_no_message() {
        let raw = json!({"errno": 100_000});
        let outcome = classify_checkin("", false, &raw);
        assert_eq!(outcome.status, CheckinStatus::Failed);
        assert!(outcome.detail.contains("100000"));
    }

    #[test]
    fn test_json_text_coercion() {
        assert_eq!(json_text(&json!("abc")), "abc");
        assert_eq!(json_text(&json!(42)), "42");
        assert_eq!(json_text(&Value::Null), "");
    }
}
