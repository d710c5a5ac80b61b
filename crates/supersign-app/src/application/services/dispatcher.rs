use chrono::Utc;
use log::{error, info, warn};
use serde_json::json;
use std::sync::Arc;

use supersign_domain::account::Account;
use supersign_domain::notification::{EventCategory, PushMessage, PushSender};
use supersign_domain::shared::AccountId;
use supersign_domain::task_log::{TaskLogEntry, TaskLogRepository};

use super::dedup::PushDedupCache;

/// Title limit imposed by the push transport, in characters.
const MAX_TITLE_CHARS: usize = 32;
/// Body limit imposed by the push transport, in UTF-8 bytes.
const MAX_BODY_BYTES: usize = 32_000;
/// Characters kept when the body is over the limit.
const TRUNCATED_BODY_CHARS: usize = 10_000;
const BODY_TRUNCATION_NOTICE: &str = "\n\n...(内容过长已截断)";

/// Terminal state of one dispatch attempt. None of these propagate as an
/// error; a failed push never aborts the run that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    /// Suppressed by the dedup window.
    Suppressed,
    /// No sendkey anywhere; recorded in the task log only.
    NoDestination,
    Failed(String),
}

/// Outbound notification pipeline: dedup gate, destination resolution,
/// transport size limits, delivery, and a task-log record for every attempt.
pub struct NotificationDispatcher {
    sender: Arc<dyn PushSender>,
    task_logs: Arc<dyn TaskLogRepository>,
    dedup: PushDedupCache,
    default_sendkey: Option<String>,
}

impl NotificationDispatcher {
    pub fn new(
        sender: Arc<dyn PushSender>,
        task_logs: Arc<dyn TaskLogRepository>,
        default_sendkey: Option<String>,
    ) -> Self {
        Self {
            sender,
            task_logs,
            dedup: PushDedupCache::new(),
            default_sendkey,
        }
    }

    /// Override the dedup cache, for tests.
    pub fn with_dedup(mut self, dedup: PushDedupCache) -> Self {
        self.dedup = dedup;
        self
    }

    pub async fn dispatch(
        &self,
        category: EventCategory,
        message: PushMessage,
        account: Option<&Account>,
        force: bool,
    ) -> DispatchOutcome {
        let account_id = account.map(|a| a.id().clone());

        // 1. Dedup gate. Forced and exempt sends bypass it entirely and do
        //    not touch the cache.
        if !force && !category.dedup_exempt() {
            let suppressed = self
                .dedup
                .check_and_record(account_id.as_ref(), category, Utc::now())
                .await;
            if suppressed {
                info!(
                    "推送已去重: account={:?}, event={}",
                    account_id.as_ref().map(AccountId::as_str),
                    category.as_str()
                );
                self.record(
                    account_id,
                    category,
                    "skip",
                    format!("推送已去重（10分钟内重复事件）: {}", message.title),
                    json!({ "title": message.title }),
                )
                .await;
                return DispatchOutcome::Suppressed;
            }
        }

        // 2. Destination: account-level key, else system-wide default.
        let sendkey = account
            .and_then(|a| a.sendkey())
            .or(self.default_sendkey.as_deref());
        let Some(sendkey) = sendkey else {
            warn!("无可用 SendKey, 仅记录日志: {}", message.title);
            self.record(
                account_id,
                category,
                "skip",
                format!("无可用 SendKey: {}", message.title),
                json!({ "title": message.title }),
            )
            .await;
            return DispatchOutcome::NoDestination;
        };

        // 3. Transport size limits, enforced on every message.
        let message = PushMessage::new(
            truncate_title(&message.title),
            truncate_body(&message.desp),
        );

        // 4. Delivery; the sender retries transient failures internally.
        match self.sender.send(sendkey, &message).await {
            Ok(receipt) => {
                self.record(
                    account_id,
                    category,
                    "success",
                    "推送成功",
                    json!({ "title": message.title, "status_code": receipt.status_code }),
                )
                .await;
                DispatchOutcome::Sent
            }
            Err(e) => {
                error!("推送失败: {}", e);
                self.record(
                    account_id,
                    category,
                    "fail",
                    format!("推送失败: {}", e),
                    json!({ "title": message.title }),
                )
                .await;
                DispatchOutcome::Failed(e.to_string())
            }
        }
    }

    async fn record(
        &self,
        account_id: Option<AccountId>,
        category: EventCategory,
        status: &str,
        message: impl Into<String>,
        detail: serde_json::Value,
    ) {
        let entry = TaskLogEntry::new(account_id, category.log_event(), status, message)
            .with_detail(detail);
        if let Err(e) = self.task_logs.append(entry).await {
            error!("Failed to record push log entry: {}", e);
        }
    }
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() <= MAX_TITLE_CHARS {
        title.to_string()
    } else {
        let kept: String = title.chars().take(MAX_TITLE_CHARS - 1).collect();
        format!("{}…", kept)
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_BODY_BYTES {
        body.to_string()
    } else {
        let kept: String = body.chars().take(TRUNCATED_BODY_CHARS).collect();
        format!("{}{}", kept, BODY_TRUNCATION_NOTICE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_title_untouched() {
        assert_eq!(truncate_title("签到·小明·全部完成"), "签到·小明·全部完成");
    }

    #[test]
    fn test_long_title_cut_to_31_chars_plus_ellipsis() {
        let long = "签".repeat(40);
        let cut = truncate_title(&long);
        assert_eq!(cut.chars().count(), 32);
        assert!(cut.ends_with('…'));
        assert_eq!(cut.chars().take(31).collect::<String>(), "签".repeat(31));
    }

    #[test]
    fn test_title_at_limit_is_kept() {
        let exact = "a".repeat(32);
        assert_eq!(truncate_title(&exact), exact);
    }

    #[test]
    fn test_long_body_truncated_with_notice() {
        // Multi-byte characters push the byte count over the limit quickly
        let long = "签到".repeat(10_000);
        assert!(long.len() > MAX_BODY_BYTES);

        let cut = truncate_body(&long);
        assert!(cut.ends_with(BODY_TRUNCATION_NOTICE));
        assert_eq!(
            cut.chars().count(),
            TRUNCATED_BODY_CHARS + BODY_TRUNCATION_NOTICE.chars().count()
        );
    }

    #[test]
    fn test_body_at_limit_untouched() {
        let body = "a".repeat(MAX_BODY_BYTES);
        assert_eq!(truncate_body(&body), body);
    }
}
