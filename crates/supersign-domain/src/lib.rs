// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod account;
pub mod checkin;
pub mod notification;
pub mod session;
pub mod shared;
pub mod task_log;

// Re-exports for convenience
pub use shared::{AccountId, DomainError};
