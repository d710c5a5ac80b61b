use async_trait::async_trait;
use log::{info, warn};

use supersign_domain::checkin::{CheckinOutcome, CheckinStrategy, StrategyError, Topic};

use super::shared::{classify_checkin, extract_container_id, json_text, WeiboApi};

const GET_INDEX_URL: &str = "https://m.weibo.cn/api/container/getIndex";
const MOBILE_BASE_URL: &str = "https://m.weibo.cn";
const FOLLOWSUPER_CONTAINER: &str = "100803_-_followsuper";

/// Simplified variant against the mobile-web API: one unpaged listing whose
/// items carry a relative checkin path that must be completed against the
/// m.weibo.cn base.
pub struct MobileWebStrategy {
    api: WeiboApi,
}

impl MobileWebStrategy {
    pub(super) fn new(api: WeiboApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CheckinStrategy for MobileWebStrategy {
    async fn list_topics(&self) -> Result<Vec<Topic>, StrategyError> {
        // Single page, no pagination cursor on this endpoint. The captured
        // api.weibo.cn params do not apply to the mobile-web host, so the
        // query is built raw.
        let url = format!(
            "{}?containerid={}&page_type=08",
            GET_INDEX_URL, FOLLOWSUPER_CONTAINER
        );
        let data = self
            .api
            .get_json_raw(&url, self.api.timeouts.listing)
            .await?;

        let mut topics = Vec::new();
        let cards = data["data"]["cards"].as_array().cloned().unwrap_or_default();

        for card in &cards {
            let Some(group) = card["card_group"].as_array() else {
                continue;
            };
            for item in group {
                let card_type = &item["card_type"];
                let is_topic = card_type.as_i64() == Some(8) || card_type.as_str() == Some("8");
                if !is_topic {
                    continue;
                }

                let title = item["title_sub"].as_str().unwrap_or("未知超话");
                let scheme = item["scheme"].as_str().unwrap_or("");
                let action = item["button"]["action"].as_str().unwrap_or("");

                let Some(cid) = extract_container_id(scheme) else {
                    warn!(
                        "mobileweb: topic [{}] has no extractable container id, scheme={}",
                        title, scheme
                    );
                    continue;
                };
                if action.is_empty() {
                    warn!("mobileweb: topic [{}] has no checkin action, dropped", title);
                    continue;
                }
                topics.push(Topic::new(title, cid, action));
            }
        }

        info!("mobileweb: discovered {} topics", topics.len());
        Ok(topics)
    }

    async fn checkin(&self, topic: &Topic) -> CheckinOutcome {
        // The action is a relative path, e.g. `/api/container/button?...`
        let url = if topic.action.starts_with("http") {
            topic.action.clone()
        } else {
            format!("{}{}", MOBILE_BASE_URL, topic.action)
        };

        let result = self.api.get_json_raw(&url, self.api.timeouts.checkin).await;

        match result {
            Ok(data) => {
                let msg = json_text(&data["msg"]);
                let numeric_ok = data["ok"].as_i64() == Some(1);
                classify_checkin(&msg, numeric_ok, &data)
            }
            Err(e) => {
                warn!("mobileweb: checkin failed [{}]: {}", topic.title, e);
                CheckinOutcome::failed(e.to_string())
            }
        }
    }
}
