mod repository;
mod types;

pub use repository::TaskLogRepository;
pub use types::TaskLogEntry;
