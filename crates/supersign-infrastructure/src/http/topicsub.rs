use async_trait::async_trait;
use log::{info, warn};
use serde_json::json;

use supersign_domain::checkin::{CheckinOutcome, CheckinStrategy, StrategyError, Topic};

use super::shared::{classify_checkin, json_text, WeiboApi};

const TOPICSUB_URL: &str = "https://api.weibo.cn/2/statuses/container_timeline_topicsub";
const PAGE_BUTTON_URL: &str = "https://api.weibo.cn/2/page/button";
const CHECKIN_FLOW_ID: &str = "232478_-_one_checkin";

/// JSON-body variant: paged POST `container_timeline_topicsub` whose items
/// carry the checkin action inline, submitted back through `/2/page/button`.
pub struct TopicsubStrategy {
    api: WeiboApi,
}

impl TopicsubStrategy {
    pub(super) fn new(api: WeiboApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CheckinStrategy for TopicsubStrategy {
    async fn list_topics(&self) -> Result<Vec<Topic>, StrategyError> {
        let mut topics = Vec::new();
        let mut since_id = String::new();

        loop {
            let body = json!({
                "flowId": CHECKIN_FLOW_ID,
                "since_id": since_id,
            });
            let data = self
                .api
                .post_json(TOPICSUB_URL, &body, self.api.timeouts.listing)
                .await?;

            let groups = data["items"].as_array().cloned().unwrap_or_default();
            if groups.is_empty() {
                info!(
                    "topicsub: no items returned, ok={:?}, msg={}",
                    data["ok"].as_i64(),
                    json_text(&data["msg"])
                );
                break;
            }

            for group in &groups {
                let Some(items) = group["items"].as_array() else {
                    continue;
                };
                for item in items {
                    let item_data = &item["data"];
                    let title = item_data["title_sub"].as_str().unwrap_or("未知超话");
                    let cid = item_data["container_id"].as_str().unwrap_or("");

                    let action = item_data["buttons"]
                        .as_array()
                        .and_then(|buttons| {
                            buttons
                                .iter()
                                .filter_map(|btn| btn["action"].as_str())
                                .find(|action| !action.is_empty())
                        })
                        .unwrap_or("");

                    if cid.is_empty() || action.is_empty() {
                        warn!(
                            "topicsub: topic [{}] dropped, container_id={:?}, action present={}",
                            title,
                            cid,
                            !action.is_empty()
                        );
                        continue;
                    }
                    topics.push(Topic::new(title, cid, action));
                }
            }

            let next = json_text(&data["since_id"]);
            if next.is_empty() || next == since_id {
                break;
            }
            since_id = next;
        }

        info!("topicsub: discovered {} topics", topics.len());
        Ok(topics)
    }

    async fn checkin(&self, topic: &Topic) -> CheckinOutcome {
        let body = json!({
            "fid": CHECKIN_FLOW_ID,
            "request_url": topic.action,
            "ext_uid": topic.container_id,
        });

        let result = self
            .api
            .post_json(PAGE_BUTTON_URL, &body, self.api.timeouts.checkin)
            .await;

        match result {
            Ok(data) => {
                let msg = json_text(&data["msg"]);
                let numeric_ok = data["result"].as_i64() == Some(1);
                classify_checkin(&msg, numeric_ok, &data)
            }
            Err(e) => {
                warn!("topicsub: checkin failed [{}]: {}", topic.title, e);
                CheckinOutcome::failed(e.to_string())
            }
        }
    }
}
