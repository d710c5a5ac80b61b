use chrono::Utc;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

use supersign_domain::account::Account;

use super::types::{next_fire_after, JobMetadata};

impl super::CheckinScheduler {
    /// Install or replace the job for one account. A disabled schedule
    /// leaves no job installed. An in-flight run is never interrupted;
    /// replacement only affects future firings.
    pub async fn upsert_job(&self, account: &Account) {
        let account_id = account.id().clone();

        if !account.schedule().enabled {
            let removed = {
                let mut jobs = self.jobs.lock().await;
                jobs.remove(&account_id)
            };
            if let Some(old) = removed {
                old.abort();
                info!("移除定时任务: checkin_{}", account_id);
            }
            self.metadata.lock().await.remove(&account_id);
            info!("账号 {} 未启用定时, 跳过", account.name());
            return;
        }

        let (hour, minute) = account.schedule().hour_minute();
        let account_name = account.name().to_string();

        let runner = Arc::clone(&self.runner);
        let accounts = Arc::clone(&self.accounts);
        let timezone = self.timezone;
        let task_account_id = account_id.clone();
        let task_account_name = account_name.clone();

        let handle = tokio::spawn(async move {
            loop {
                let now = Utc::now().with_timezone(&timezone);
                let next = next_fire_after(now, hour, minute);
                let wait = (next - now).to_std().unwrap_or(Duration::from_secs(60));

                info!(
                    "下次签到 {}: {} ({}s 后)",
                    task_account_name,
                    next.format("%Y-%m-%d %H:%M:%S %Z"),
                    wait.as_secs()
                );
                sleep(wait).await;

                // Reload: the schedule may have changed since the job fired
                let account = match accounts.find_by_id(&task_account_id).await {
                    Ok(Some(account)) => account,
                    Ok(None) => {
                        warn!("定时任务: 账号 {} 不存在, 跳过", task_account_id);
                        continue;
                    }
                    Err(e) => {
                        error!("定时任务: 账号 {} 加载失败: {}", task_account_id, e);
                        continue;
                    }
                };
                if !account.schedule().enabled {
                    info!("定时任务: 账号 {} 已禁用, 跳过", account.name());
                    continue;
                }

                // Startup jitter spreads synchronized triggers apart
                let jitter_bound = account.schedule().jitter_secs;
                if jitter_bound > 0 {
                    let delay = rand::thread_rng().gen_range(0..=jitter_bound);
                    if delay > 0 {
                        info!("定时任务: {} 随机延迟 {}s", account.name(), delay);
                        sleep(Duration::from_secs(u64::from(delay))).await;
                    }
                }

                info!("定时任务开始: {}", account.name());
                // The run is detached from the timer task: aborting the job
                // handle only cancels the sleep, never an in-flight run
                let run_runner = Arc::clone(&runner);
                let run_account_id = task_account_id.clone();
                let run_account_name = account.name().to_string();
                tokio::spawn(async move {
                    // Run errors stay inside the task; the scheduler and the
                    // other jobs keep running
                    if let Err(e) = run_runner.run_for_account(&run_account_id).await {
                        error!("定时任务异常: {}: {}", run_account_name, e);
                    }
                });
            }
        });

        {
            let mut jobs = self.jobs.lock().await;
            if let Some(old) = jobs.insert(account_id.clone(), handle) {
                warn!("替换旧定时任务: checkin_{}", account_id);
                old.abort();
            }
        }

        self.metadata.lock().await.insert(
            account_id.clone(),
            JobMetadata {
                job_id: format!("checkin_{}", account_id),
                display_name: format!("签到-{}", account_name),
                hour,
                minute,
            },
        );

        info!(
            "已应用定时任务: {} -> {:02}:{:02}",
            account_name, hour, minute
        );
    }
}
