mod memory;

pub use memory::{InMemoryAccountRepository, InMemoryTaskLogRepository};
