mod task_manager;
mod task_spawner;
mod types;

use chrono_tz::Tz;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::info;

use supersign_domain::account::AccountRepository;
use supersign_domain::shared::AccountId;

use super::runner::CheckinRunner;
use types::JobMetadata;

pub use types::JobInfo;

/// One timer-driven job per schedule-enabled account, each a spawned tokio
/// loop: compute next fire, sleep, jitter, reload, run. The job registry is
/// the only shared state; jobs for different accounts run independently.
pub struct CheckinScheduler {
    jobs: Arc<Mutex<HashMap<AccountId, JoinHandle<()>>>>,
    metadata: Arc<Mutex<HashMap<AccountId, JobMetadata>>>,
    runner: Arc<CheckinRunner>,
    accounts: Arc<dyn AccountRepository>,
    timezone: Tz,
}

impl CheckinScheduler {
    pub fn new(
        runner: Arc<CheckinRunner>,
        accounts: Arc<dyn AccountRepository>,
        timezone: Tz,
    ) -> Self {
        Self {
            jobs: Arc::new(Mutex::new(HashMap::new())),
            metadata: Arc::new(Mutex::new(HashMap::new())),
            runner,
            accounts,
            timezone,
        }
    }

    pub async fn start(&self) {
        info!("调度器已启动 (timezone: {})", self.timezone);
    }
}
