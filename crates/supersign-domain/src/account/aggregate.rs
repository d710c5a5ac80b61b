use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{CookieBundle, RunPolicy, ScheduleConfig};
use crate::checkin::RunStatus;
use crate::shared::{AccountId, DomainError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    name: String,
    credentials: CookieBundle,
    cookie_updated_at: Option<DateTime<Utc>>,
    schedule: ScheduleConfig,
    policy: RunPolicy,
    sendkey: Option<String>,
    last_run_at: Option<DateTime<Utc>>,
    last_run_status: Option<RunStatus>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new(name: String) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Account name cannot be empty".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Self {
            id: AccountId::new(),
            name: name.trim().to_string(),
            credentials: CookieBundle::empty(),
            cookie_updated_at: None,
            schedule: ScheduleConfig::default(),
            policy: RunPolicy::default(),
            sendkey: None,
            last_run_at: None,
            last_run_status: None,
            created_at: now,
            updated_at: now,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: AccountId,
        name: String,
        credentials: CookieBundle,
        cookie_updated_at: Option<DateTime<Utc>>,
        schedule: ScheduleConfig,
        policy: RunPolicy,
        sendkey: Option<String>,
        last_run_at: Option<DateTime<Utc>>,
        last_run_status: Option<RunStatus>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            credentials,
            cookie_updated_at,
            schedule,
            policy,
            sendkey,
            last_run_at,
            last_run_status,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credentials(&self) -> &CookieBundle {
        &self.credentials
    }

    pub fn cookie_updated_at(&self) -> Option<DateTime<Utc>> {
        self.cookie_updated_at
    }

    pub fn schedule(&self) -> &ScheduleConfig {
        &self.schedule
    }

    pub fn policy(&self) -> &RunPolicy {
        &self.policy
    }

    pub fn sendkey(&self) -> Option<&str> {
        self.sendkey.as_deref()
    }

    pub fn last_run_at(&self) -> Option<DateTime<Utc>> {
        self.last_run_at
    }

    /// `None` means the account has never run.
    pub fn last_run_status(&self) -> Option<RunStatus> {
        self.last_run_status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn update_credentials(&mut self, credentials: CookieBundle) -> Result<(), DomainError> {
        if !credentials.is_complete() {
            return Err(DomainError::InvalidCredentials(
                "SUB and SUBP cookies are required".to_string(),
            ));
        }
        self.credentials = credentials;
        self.cookie_updated_at = Some(Utc::now());
        self.touch();
        Ok(())
    }

    pub fn update_schedule(&mut self, schedule: ScheduleConfig) {
        self.schedule = schedule;
        self.touch();
    }

    pub fn update_policy(&mut self, policy: RunPolicy) -> Result<(), DomainError> {
        if policy.retry_count == 0 {
            return Err(DomainError::Validation(
                "Retry count must be at least 1".to_string(),
            ));
        }
        if policy.request_interval_secs < 0.0 {
            return Err(DomainError::Validation(
                "Request interval cannot be negative".to_string(),
            ));
        }
        self.policy = policy;
        self.touch();
        Ok(())
    }

    pub fn set_sendkey(&mut self, sendkey: Option<String>) {
        self.sendkey = sendkey.filter(|k| !k.is_empty());
        self.touch();
    }

    /// Called by the orchestrator after every run, whatever the outcome.
    pub fn record_run(&mut self, status: RunStatus) {
        self.last_run_at = Some(Utc::now());
        self.last_run_status = Some(status);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
