use anyhow::{Context, Result};
use chrono::Utc;
use log::{error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::instrument;

use supersign_domain::account::{Account, AccountRepository};
use supersign_domain::checkin::{RunStatus, RunSummary, StrategyFactory};
use supersign_domain::notification::EventCategory;
use supersign_domain::session::{SessionProbe, SessionState};
use supersign_domain::shared::AccountId;
use supersign_domain::task_log::{TaskLogEntry, TaskLogRepository};

use super::dispatcher::{DispatchOutcome, NotificationDispatcher};
use super::messages;
use super::retry::RetryExecutor;

const NO_TOPICS_MESSAGE: &str = "无可签到超话 (未获取到关注的超话列表，请检查Cookie或API参数)";

/// Terminal result of one run, returned synchronously to on-demand callers
/// in addition to being logged and pushed.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub status: RunStatus,
    /// Absent when credential validation failed and no items were processed.
    pub summary: Option<RunSummary>,
}

/// One account's slot in a batch run. Per-account failures are captured
/// here instead of aborting the batch.
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub account_id: AccountId,
    pub account_name: String,
    pub result: Result<RunReport, String>,
}

/// The orchestration glue: load account, probe the session, list topics,
/// retry per-topic checkins, aggregate, persist, notify.
pub struct CheckinRunner {
    accounts: Arc<dyn AccountRepository>,
    task_logs: Arc<dyn TaskLogRepository>,
    probe: Arc<dyn SessionProbe>,
    strategies: Arc<dyn StrategyFactory>,
    dispatcher: Arc<NotificationDispatcher>,
    retry: RetryExecutor,
}

impl CheckinRunner {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        task_logs: Arc<dyn TaskLogRepository>,
        probe: Arc<dyn SessionProbe>,
        strategies: Arc<dyn StrategyFactory>,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            accounts,
            task_logs,
            probe,
            strategies,
            dispatcher,
            retry: RetryExecutor::new(),
        }
    }

    /// Override the retry executor, for tests.
    pub fn with_retry_executor(mut self, retry: RetryExecutor) -> Self {
        self.retry = retry;
        self
    }

    /// Run the full checkin flow for one account.
    #[instrument(skip(self), fields(account_id = %account_id))]
    pub async fn run_for_account(&self, account_id: &AccountId) -> Result<RunReport> {
        let mut account = self
            .accounts
            .find_by_id(account_id)
            .await
            .context("Failed to load account")?
            .with_context(|| format!("Account not found: {}", account_id))?;

        let account_name = account.name().to_string();
        info!("开始签到: {}", account_name);

        // 1. Session probe; a single failed probe is authoritative
        let session = self.probe.probe(account.credentials()).await;
        if !session.is_valid() {
            warn!("Cookie 无效: {}", account_name);
            return self.finish_credential_invalid(account).await;
        }

        // 2. Listing; any paging error degrades to an empty run
        let strategy = self.strategies.for_credentials(account.credentials());
        let topics = match strategy.list_topics().await {
            Ok(topics) => topics,
            Err(e) => {
                error!("获取超话列表失败: {}: {}", account_name, e);
                Vec::new()
            }
        };

        if topics.is_empty() {
            info!("无可签到超话: {}", account_name);
            return self.finish_no_topics(account).await;
        }

        // 3. Sequential per-topic checkin with bounded retries; topics are
        //    separated by the account's inter-request delay
        let total = topics.len();
        info!("获取到 {} 个超话，开始逐一签到: {}", total, account_name);

        let interval = Duration::from_secs_f64(account.policy().request_interval_secs.max(0.0));
        let retry_count = account.policy().retry_count;
        let mut summary = RunSummary::new();

        for (idx, topic) in topics.iter().enumerate() {
            let outcome = self
                .retry
                .checkin_with_retry(strategy.as_ref(), topic, retry_count)
                .await;
            info!(
                "  [{}/{}] [{}] {}: {}",
                idx + 1,
                total,
                outcome.status.as_str(),
                topic.title,
                outcome.detail
            );
            summary.record(&topic.title, &outcome);

            if idx + 1 < total && !interval.is_zero() {
                sleep(interval).await;
            }
        }

        // 4. Aggregate, persist, notify
        let status = summary.status();
        let message = format!(
            "总计{}, 成功{}, 已签{}, 失败{}",
            summary.total, summary.success, summary.already, summary.failed
        );
        self.append_log(
            TaskLogEntry::new(
                Some(account.id().clone()),
                "checkin",
                status.as_str(),
                &message,
            )
            .with_detail(serde_json::to_value(&summary)?),
        )
        .await;

        account.record_run(status);
        self.accounts
            .save(&account)
            .await
            .context("Failed to persist run status")?;

        let report = messages::build_checkin_message(&account_name, true, &summary, Utc::now());
        self.dispatcher
            .dispatch(EventCategory::Checkin, report, Some(&account), false)
            .await;

        info!("签到完成: {} - {}", account_name, message);
        Ok(RunReport {
            status,
            summary: Some(summary),
        })
    }

    /// Sequentially run every schedule-enabled account, capturing per-account
    /// errors instead of aborting the batch.
    pub async fn run_all(&self) -> Result<Vec<BatchEntry>> {
        let accounts = self
            .accounts
            .find_scheduled()
            .await
            .context("Failed to list scheduled accounts")?;

        let mut entries = Vec::with_capacity(accounts.len());
        for account in accounts {
            let result = match self.run_for_account(account.id()).await {
                Ok(report) => Ok(report),
                Err(e) => {
                    error!("签到批量执行失败: {}: {}", account.name(), e);
                    Err(e.to_string())
                }
            };
            entries.push(BatchEntry {
                account_id: account.id().clone(),
                account_name: account.name().to_string(),
                result,
            });
        }
        Ok(entries)
    }

    /// On-demand credential probe. Does not mutate the account or push.
    pub async fn verify_credentials(&self, account_id: &AccountId) -> Result<SessionState> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await
            .context("Failed to load account")?
            .with_context(|| format!("Account not found: {}", account_id))?;

        Ok(self.probe.probe(account.credentials()).await)
    }

    /// Push the credential-update confirmation after the harvesting tool
    /// uploads a bundle. Subject to the standard dedup window.
    pub async fn notify_credential_update(&self, account: &Account, success: bool, detail: &str) {
        let message =
            messages::build_cookie_update_message(account.name(), success, detail, Utc::now());
        self.dispatcher
            .dispatch(EventCategory::CookieUpdate, message, Some(account), false)
            .await;
    }

    /// Operator probe of the push channel. Always forced past the dedup gate
    /// so repeated probes each get a delivery attempt.
    pub async fn send_test_push(&self, account: Option<&Account>) -> DispatchOutcome {
        self.dispatcher
            .dispatch(
                EventCategory::PushTest,
                messages::build_test_message(),
                account,
                true,
            )
            .await
    }

    async fn finish_credential_invalid(&self, mut account: Account) -> Result<RunReport> {
        let account_name = account.name().to_string();

        self.append_log(TaskLogEntry::new(
            Some(account.id().clone()),
            "cookie_invalid",
            "fail",
            format!("Cookie 已失效: {}", account_name),
        ))
        .await;

        account.record_run(RunStatus::CredentialInvalid);
        self.accounts
            .save(&account)
            .await
            .context("Failed to persist run status")?;

        let alert = messages::build_cookie_invalid_message(&account_name, Utc::now());
        self.dispatcher
            .dispatch(EventCategory::CookieInvalid, alert, Some(&account), false)
            .await;

        Ok(RunReport {
            status: RunStatus::CredentialInvalid,
            summary: None,
        })
    }

    async fn finish_no_topics(&self, mut account: Account) -> Result<RunReport> {
        let account_name = account.name().to_string();
        let summary = RunSummary::new();

        // Zero topics reports success so idle accounts raise no false
        // alarms; "healthy but idle" and "listing silently broken" look the
        // same here, which consumers distinguish by total == 0.
        self.append_log(
            TaskLogEntry::new(
                Some(account.id().clone()),
                "checkin",
                RunStatus::Success.as_str(),
                NO_TOPICS_MESSAGE,
            )
            .with_detail(serde_json::to_value(&summary)?),
        )
        .await;

        account.record_run(RunStatus::Success);
        self.accounts
            .save(&account)
            .await
            .context("Failed to persist run status")?;

        // Forced so the empty-run report survives the dedup gate
        let report = messages::build_checkin_message(&account_name, true, &summary, Utc::now());
        self.dispatcher
            .dispatch(EventCategory::Checkin, report, Some(&account), true)
            .await;

        Ok(RunReport {
            status: RunStatus::Success,
            summary: Some(summary),
        })
    }

    async fn append_log(&self, entry: TaskLogEntry) {
        if let Err(e) = self.task_logs.append(entry).await {
            error!("Failed to append task log entry: {}", e);
        }
    }
}
