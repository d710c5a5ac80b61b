mod dedup;
mod dispatcher;
mod messages;
mod retry;
mod runner;
mod scheduler;

pub use dedup::PushDedupCache;
pub use dispatcher::{DispatchOutcome, NotificationDispatcher};
pub use messages::{
    build_checkin_message, build_cookie_invalid_message, build_cookie_update_message,
    build_test_message,
};
pub use retry::RetryExecutor;
pub use runner::{BatchEntry, CheckinRunner, RunReport};
pub use scheduler::{CheckinScheduler, JobInfo};
