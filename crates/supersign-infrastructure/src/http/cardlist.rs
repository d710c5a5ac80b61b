use async_trait::async_trait;
use log::{info, warn};

use supersign_domain::checkin::{CheckinOutcome, CheckinStrategy, StrategyError, Topic};

use super::shared::{classify_checkin, extract_container_id, json_text, WeiboApi};

const CARDLIST_URL: &str = "https://api.weibo.cn/2/cardlist";
const PAGE_BUTTON_URL: &str = "https://api.weibo.cn/2/page/button";
const FOLLOWSUPER_CONTAINER: &str = "100803_-_followsuper";
const CHECKIN_FID: &str = "232478_-_one_checkin";

/// Default variant: paged GET `/2/cardlist`, checkin through `/2/page/button`
/// with a composed `request_url`.
pub struct CardlistStrategy {
    api: WeiboApi,
}

impl CardlistStrategy {
    pub(super) fn new(api: WeiboApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CheckinStrategy for CardlistStrategy {
    async fn list_topics(&self) -> Result<Vec<Topic>, StrategyError> {
        let mut topics = Vec::new();
        let mut since_id = String::new();

        loop {
            let data = self
                .api
                .get_json(
                    CARDLIST_URL,
                    &[
                        ("containerid", FOLLOWSUPER_CONTAINER),
                        ("fid", FOLLOWSUPER_CONTAINER),
                        ("page_type", "08"),
                        ("since_id", &since_id),
                    ],
                    self.api.timeouts.listing,
                )
                .await?;

            let cards = data["cards"].as_array().cloned().unwrap_or_default();
            if cards.is_empty() {
                info!(
                    "cardlist: no cards returned, ok={:?}, msg={}",
                    data["ok"].as_i64(),
                    json_text(&data["msg"])
                );
                break;
            }

            for card in &cards {
                let Some(group) = card["card_group"].as_array() else {
                    continue;
                };
                for item in group {
                    let card_type = &item["card_type"];
                    // card_type arrives as int or string depending on client version
                    let is_topic =
                        card_type.as_i64() == Some(8) || card_type.as_str() == Some("8");
                    if !is_topic {
                        continue;
                    }

                    let title = item["title_sub"].as_str().unwrap_or("未知超话");
                    let scheme = item["scheme"].as_str().unwrap_or("");
                    match extract_container_id(scheme) {
                        Some(cid) => topics.push(Topic::new(title, cid, scheme)),
                        None => warn!(
                            "cardlist: topic [{}] has no extractable container id, scheme={}",
                            title, scheme
                        ),
                    }
                }
            }

            // Repeat-cursor check: this endpoint is known to loop instead of
            // terminating on the last page.
            let next = json_text(&data["cardlistInfo"]["since_id"]);
            if next.is_empty() || next == since_id {
                break;
            }
            since_id = next;
        }

        info!("cardlist: discovered {} topics", topics.len());
        Ok(topics)
    }

    async fn checkin(&self, topic: &Topic) -> CheckinOutcome {
        let request_url = format!(
            "http://i.huati.weibo.com/mobile/super/active_fcheckin\
             ?cardid=bottom_one_checkin\
             &container_id={cid}\
             &pageid={cid}\
             &scheme_type=1",
            cid = topic.container_id
        );

        let result = self
            .api
            .get_json(
                PAGE_BUTTON_URL,
                &[("fid", CHECKIN_FID), ("request_url", &request_url)],
                self.api.timeouts.checkin,
            )
            .await;

        match result {
            Ok(data) => {
                let msg = json_text(&data["msg"]);
                let numeric_ok = data["result"].as_i64() == Some(1);
                classify_checkin(&msg, numeric_ok, &data)
            }
            Err(e) => {
                warn!("cardlist: checkin failed [{}]: {}", topic.title, e);
                CheckinOutcome::failed(e.to_string())
            }
        }
    }
}
