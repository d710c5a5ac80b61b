use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;

use supersign_domain::notification::EventCategory;
use supersign_domain::shared::AccountId;

/// Rolling-window suppression of repeated alerts, keyed on
/// (account or system-wide, category). Entries are overwritten on each
/// allowed send and never explicitly deleted; the window check alone
/// governs suppression.
pub struct PushDedupCache {
    entries: Mutex<HashMap<(Option<AccountId>, EventCategory), DateTime<Utc>>>,
    window: Duration,
}

impl PushDedupCache {
    pub fn new() -> Self {
        Self::with_window(Duration::seconds(600))
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            window,
        }
    }

    /// Returns true when the send should be suppressed. An allowed send
    /// records `now` as the key's last-sent timestamp; a suppressed one
    /// leaves the stored timestamp untouched so the window does not slide.
    pub async fn check_and_record(
        &self,
        account_id: Option<&AccountId>,
        category: EventCategory,
        now: DateTime<Utc>,
    ) -> bool {
        let key = (account_id.cloned(), category);
        let mut entries = self.entries.lock().await;

        if let Some(last) = entries.get(&key) {
            if now - *last < self.window {
                return true;
            }
        }

        entries.insert(key, now);
        false
    }
}

impl Default for PushDedupCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_second_send_within_window_is_suppressed() {
        let cache = PushDedupCache::new();
        let id = AccountId::new();
        let t0 = Utc::now();

        assert!(
            !cache
                .check_and_record(Some(&id), EventCategory::CookieInvalid, t0)
                .await
        );
        assert!(
            cache
                .check_and_record(
                    Some(&id),
                    EventCategory::CookieInvalid,
                    t0 + Duration::seconds(599)
                )
                .await
        );
    }

    #[tokio::test]
    async fn test_send_after_window_proceeds() {
        let cache = PushDedupCache::new();
        let id = AccountId::new();
        let t0 = Utc::now();

        cache
            .check_and_record(Some(&id), EventCategory::CookieInvalid, t0)
            .await;
        assert!(
            !cache
                .check_and_record(
                    Some(&id),
                    EventCategory::CookieInvalid,
                    t0 + Duration::seconds(600)
                )
                .await
        );
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let cache = PushDedupCache::new();
        let a = AccountId::new();
        let b = AccountId::new();
        let t0 = Utc::now();

        cache
            .check_and_record(Some(&a), EventCategory::CookieInvalid, t0)
            .await;

        // Different account, different category, and system-wide all pass
        assert!(
            !cache
                .check_and_record(Some(&b), EventCategory::CookieInvalid, t0)
                .await
        );
        assert!(
            !cache
                .check_and_record(Some(&a), EventCategory::CookieUpdate, t0)
                .await
        );
        assert!(
            !cache
                .check_and_record(None, EventCategory::CookieInvalid, t0)
                .await
        );
    }

    #[tokio::test]
    async fn test_suppressed_send_does_not_slide_the_window() {
        let cache = PushDedupCache::new();
        let id = AccountId::new();
        let t0 = Utc::now();

        cache
            .check_and_record(Some(&id), EventCategory::CookieInvalid, t0)
            .await;
        // Suppressed mid-window attempt must not refresh the timestamp
        assert!(
            cache
                .check_and_record(
                    Some(&id),
                    EventCategory::CookieInvalid,
                    t0 + Duration::seconds(500)
                )
                .await
        );
        assert!(
            !cache
                .check_and_record(
                    Some(&id),
                    EventCategory::CookieInvalid,
                    t0 + Duration::seconds(601)
                )
                .await
        );
    }
}
