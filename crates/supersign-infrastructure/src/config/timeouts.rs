use std::time::Duration;

/// Per-call HTTP timeouts. The listing endpoints page through larger
/// payloads than the single-shot calls, so they get a little more headroom.
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Session probe request timeout
    pub probe: Duration,

    /// Topic listing request timeout (per page)
    pub listing: Duration,

    /// Checkin submission request timeout
    pub checkin: Duration,

    /// Push delivery request timeout
    pub push: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            probe: Duration::from_secs(10),
            listing: Duration::from_secs(15),
            checkin: Duration::from_secs(10),
            push: Duration::from_secs(15),
        }
    }
}

impl TimeoutConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
