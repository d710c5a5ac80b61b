use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use super::types::{next_fire_after, JobInfo};

impl super::CheckinScheduler {
    /// Clear every scheduler-owned job and re-install one per currently
    /// enabled account. Returns the installed count.
    pub async fn reapply_all(&self) -> Result<usize> {
        self.stop_all_jobs().await;

        let accounts = self
            .accounts
            .find_scheduled()
            .await
            .context("Failed to list scheduled accounts")?;

        let mut count = 0;
        for account in &accounts {
            self.upsert_job(account).await;
            count += 1;
        }

        info!("已应用 {} 个定时任务", count);
        Ok(count)
    }

    /// Installed jobs with their next trigger, for introspection.
    pub async fn list_jobs(&self) -> Vec<JobInfo> {
        let now = Utc::now().with_timezone(&self.timezone);
        let metadata = self.metadata.lock().await;

        let mut jobs: Vec<JobInfo> = metadata
            .values()
            .map(|meta| JobInfo {
                id: meta.job_id.clone(),
                name: meta.display_name.clone(),
                next_run_time: next_fire_after(now, meta.hour, meta.minute),
            })
            .collect();
        jobs.sort_by(|a, b| a.id.cmp(&b.id));
        jobs
    }

    pub async fn active_job_count(&self) -> usize {
        self.jobs.lock().await.len()
    }

    pub async fn stop_all_jobs(&self) {
        let mut jobs = self.jobs.lock().await;
        if !jobs.is_empty() {
            info!("停止 {} 个定时任务", jobs.len());
        }
        for (account_id, handle) in jobs.drain() {
            info!("  停止定时任务: checkin_{}", account_id);
            handle.abort();
        }
        drop(jobs);

        self.metadata.lock().await.clear();
    }

    pub async fn shutdown(&self) {
        info!("调度器关闭中");
        self.stop_all_jobs().await;
        info!("调度器已关闭");
    }
}
