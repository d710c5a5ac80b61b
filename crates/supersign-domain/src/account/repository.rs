use async_trait::async_trait;

use super::aggregate::Account;
use crate::shared::{AccountId, DomainError};

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Save (upsert) an account.
    async fn save(&self, account: &Account) -> Result<(), DomainError>;

    /// Find an account by id.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError>;

    /// List every account.
    async fn find_all(&self) -> Result<Vec<Account>, DomainError>;

    /// List accounts whose schedule is enabled.
    async fn find_scheduled(&self) -> Result<Vec<Account>, DomainError>;
}
