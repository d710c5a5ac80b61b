use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use supersign_domain::account::{Account, AccountRepository};
use supersign_domain::shared::{AccountId, DomainError};
use supersign_domain::task_log::{TaskLogEntry, TaskLogRepository};

/// Mutex-protected account store. The real datastore lives outside this
/// system; this implementation backs the daemon and the tests.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<AccountId, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn save(&self, account: &Account) -> Result<(), DomainError> {
        let mut accounts = self.accounts.lock().await;
        accounts.insert(account.id().clone(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.lock().await;
        Ok(accounts.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Account>, DomainError> {
        let accounts = self.accounts.lock().await;
        let mut all: Vec<Account> = accounts.values().cloned().collect();
        all.sort_by(|a, b| a.created_at().cmp(&b.created_at()));
        Ok(all)
    }

    async fn find_scheduled(&self) -> Result<Vec<Account>, DomainError> {
        let all = self.find_all().await?;
        Ok(all
            .into_iter()
            .filter(|account| account.schedule().enabled)
            .collect())
    }
}

/// Append-only task log store, newest entries served first.
#[derive(Default)]
pub struct InMemoryTaskLogRepository {
    entries: Mutex<Vec<TaskLogEntry>>,
}

impl InMemoryTaskLogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskLogRepository for InMemoryTaskLogRepository {
    async fn append(&self, entry: TaskLogEntry) -> Result<(), DomainError> {
        let mut entries = self.entries.lock().await;
        entries.push(entry);
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<TaskLogEntry>, DomainError> {
        let entries = self.entries.lock().await;
        Ok(entries.iter().rev().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use supersign_domain::account::ScheduleConfig;

    #[tokio::test]
    async fn test_account_save_and_find() {
        let repo = InMemoryAccountRepository::new();
        let account = Account::new("测试账号".to_string()).unwrap();
        let id = account.id().clone();

        repo.save(&account).await.unwrap();

        let found = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(found.name(), "测试账号");

        let missing = repo
            .find_by_id(&AccountId::from_string("nope"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_save_is_upsert() {
        let repo = InMemoryAccountRepository::new();
        let mut account = Account::new("a".to_string()).unwrap();
        repo.save(&account).await.unwrap();

        account.update_schedule(ScheduleConfig::daily_at("09:30", 60));
        repo.save(&account).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].schedule().time, "09:30");
    }

    #[tokio::test]
    async fn test_find_scheduled_filters_disabled() {
        let repo = InMemoryAccountRepository::new();

        let mut enabled = Account::new("enabled".to_string()).unwrap();
        enabled.update_schedule(ScheduleConfig::daily_at("08:00", 0));
        repo.save(&enabled).await.unwrap();

        let disabled = Account::new("disabled".to_string()).unwrap();
        repo.save(&disabled).await.unwrap();

        let scheduled = repo.find_scheduled().await.unwrap();
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].name(), "enabled");
    }

    #[tokio::test]
    async fn test_task_log_recent_is_newest_first() {
        let repo = InMemoryTaskLogRepository::new();
        for i in 0..5 {
            repo.append(TaskLogEntry::new(
                None,
                "checkin",
                "success",
                format!("run {}", i),
            ))
            .await
            .unwrap();
        }

        let recent = repo.recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message(), "run 4");
        assert_eq!(recent[1].message(), "run 3");
    }
}
