use log::debug;
use std::time::Duration;
use tokio::time::sleep;

use supersign_domain::checkin::{CheckinOutcome, CheckinStrategy, Topic};

/// Bounded-attempt policy around a single topic's checkin: retry until the
/// strategy returns a non-failed outcome or the ceiling is reached, with a
/// settle delay between attempts (never after the last).
pub struct RetryExecutor {
    settle_delay: Duration,
}

impl RetryExecutor {
    pub fn new() -> Self {
        Self {
            settle_delay: Duration::from_secs(1),
        }
    }

    /// Override the settle delay, for tests.
    pub fn with_settle_delay(settle_delay: Duration) -> Self {
        Self { settle_delay }
    }

    pub async fn checkin_with_retry(
        &self,
        strategy: &dyn CheckinStrategy,
        topic: &Topic,
        max_attempts: u32,
    ) -> CheckinOutcome {
        let max_attempts = max_attempts.max(1);
        let mut last = CheckinOutcome::failed("no attempt made");

        for attempt in 1..=max_attempts {
            last = strategy.checkin(topic).await;
            if !last.is_failed() {
                return last;
            }
            if attempt < max_attempts {
                debug!(
                    "Checkin attempt {}/{} failed for [{}], retrying",
                    attempt, max_attempts, topic.title
                );
                sleep(self.settle_delay).await;
            }
        }

        last
    }
}

impl Default for RetryExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use supersign_domain::checkin::{CheckinStatus, StrategyError};

    /// Strategy whose checkin replays a script of outcomes, then keeps
    /// returning the last one.
    struct ScriptedStrategy {
        script: Vec<CheckinOutcome>,
        calls: AtomicUsize,
    }

    impl ScriptedStrategy {
        fn new(script: Vec<CheckinOutcome>) -> Self {
            Self {
                script,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CheckinStrategy for ScriptedStrategy {
        async fn list_topics(&self) -> Result<Vec<Topic>, StrategyError> {
            Ok(Vec::new())
        }

        async fn checkin(&self, _topic: &Topic) -> CheckinOutcome {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .get(call)
                .or_else(|| self.script.last())
                .cloned()
                .unwrap_or_else(|| CheckinOutcome::failed("empty script"))
        }
    }

    fn topic() -> Topic {
        Topic::new("测试超话", "10080812345", "sinaweibo://checkin")
    }

    fn executor() -> RetryExecutor {
        RetryExecutor::with_settle_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_stops_on_first_success() {
        let strategy = ScriptedStrategy::new(vec![CheckinOutcome::success("ok")]);
        let outcome = executor().checkin_with_retry(&strategy, &topic(), 5).await;
        assert_eq!(outcome.status, CheckinStatus::Success);
        assert_eq!(strategy.calls(), 1);
    }

    #[tokio::test]
    async fn test_already_done_counts_as_non_failed() {
        let strategy = ScriptedStrategy::new(vec![
            CheckinOutcome::failed("boom"),
            CheckinOutcome::already("今日已签到"),
        ]);
        let outcome = executor().checkin_with_retry(&strategy, &topic(), 3).await;
        assert_eq!(outcome.status, CheckinStatus::Already);
        assert_eq!(strategy.calls(), 2);
    }

    #[tokio::test]
    async fn test_exhausts_ceiling_and_returns_last_failure() {
        let strategy = ScriptedStrategy::new(vec![
            CheckinOutcome::failed("first"),
            CheckinOutcome::failed("second"),
            CheckinOutcome::failed("third"),
        ]);
        let outcome = executor().checkin_with_retry(&strategy, &topic(), 3).await;
        assert_eq!(outcome.status, CheckinStatus::Failed);
        assert_eq!(outcome.detail, "third");
        assert_eq!(strategy.calls(), 3);
    }

    #[tokio::test]
    async fn test_ceiling_one_means_single_attempt() {
        let strategy = ScriptedStrategy::new(vec![
            CheckinOutcome::failed("boom"),
            CheckinOutcome::success("never reached"),
        ]);
        let outcome = executor().checkin_with_retry(&strategy, &topic(), 1).await;
        assert_eq!(outcome.status, CheckinStatus::Failed);
        assert_eq!(strategy.calls(), 1);
    }

    #[tokio::test]
    async fn test_zero_ceiling_clamped_to_one() {
        let strategy = ScriptedStrategy::new(vec![CheckinOutcome::failed("boom")]);
        let outcome = executor().checkin_with_retry(&strategy, &topic(), 0).await;
        assert_eq!(outcome.status, CheckinStatus::Failed);
        assert_eq!(strategy.calls(), 1);
    }
}
