use anyhow::Result;
use std::sync::Arc;

use supersign_app::application::services::{CheckinRunner, CheckinScheduler, NotificationDispatcher};
use supersign_domain::account::AccountRepository;
use supersign_domain::checkin::StrategyFactory;
use supersign_domain::notification::PushSender;
use supersign_domain::session::SessionProbe;
use supersign_domain::task_log::TaskLogRepository;
use supersign_infrastructure::config::{Settings, TimeoutConfig};
use supersign_infrastructure::http::{WeiboSessionProbe, WeiboStrategyFactory};
use supersign_infrastructure::notification::ServerChanSender;
use supersign_infrastructure::persistence::{InMemoryAccountRepository, InMemoryTaskLogRepository};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env();

    supersign_infrastructure::logging::init_logger(settings.log_dir.clone())?;
    tracing::info!("🚀 supersign starting...");
    tracing::info!(
        "签到策略: {}, 时区: {}",
        settings.strategy.as_str(),
        settings.timezone
    );

    let timeouts = TimeoutConfig::default();

    // The real datastore is an external collaborator behind the repository
    // ports; the daemon runs against the in-memory implementations.
    let accounts: Arc<dyn AccountRepository> = Arc::new(InMemoryAccountRepository::new());
    let task_logs: Arc<dyn TaskLogRepository> = Arc::new(InMemoryTaskLogRepository::new());

    let probe: Arc<dyn SessionProbe> = Arc::new(WeiboSessionProbe::new(&timeouts)?);
    let strategies: Arc<dyn StrategyFactory> = Arc::new(WeiboStrategyFactory::new(
        settings.strategy,
        settings.api_params.clone(),
        timeouts.clone(),
    )?);
    let sender: Arc<dyn PushSender> = Arc::new(ServerChanSender::new(&timeouts));

    let dispatcher = Arc::new(NotificationDispatcher::new(
        sender,
        Arc::clone(&task_logs),
        settings.default_sendkey.clone(),
    ));
    let runner = Arc::new(CheckinRunner::new(
        Arc::clone(&accounts),
        Arc::clone(&task_logs),
        probe,
        strategies,
        dispatcher,
    ));

    let scheduler = CheckinScheduler::new(runner, Arc::clone(&accounts), settings.timezone);
    scheduler.start().await;
    let installed = scheduler.reapply_all().await?;
    tracing::info!("✅ supersign ready, {} scheduled job(s)", installed);

    tokio::signal::ctrl_c().await?;
    tracing::info!("🛑 Shutdown signal received");
    scheduler.shutdown().await;

    Ok(())
}
