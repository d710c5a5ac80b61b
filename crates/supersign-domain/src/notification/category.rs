use serde::{Deserialize, Serialize};

/// Outbound notification categories. Checkin-result reports bypass the dedup
/// window so every scheduled or manual run stays visible; the other
/// categories are subject to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Checkin,
    CookieInvalid,
    CookieUpdate,
    PushTest,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Checkin => "checkin",
            EventCategory::CookieInvalid => "cookie_invalid",
            EventCategory::CookieUpdate => "cookie_update",
            EventCategory::PushTest => "push_test",
        }
    }

    pub fn dedup_exempt(&self) -> bool {
        matches!(self, EventCategory::Checkin)
    }

    /// Event type under which dispatch attempts are logged. The test probe
    /// already carries the push_ prefix and logs under its own name.
    pub fn log_event(&self) -> String {
        match self {
            EventCategory::PushTest => self.as_str().to_string(),
            other => format!("push_{}", other.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_checkin_is_dedup_exempt() {
        assert!(EventCategory::Checkin.dedup_exempt());
        assert!(!EventCategory::CookieInvalid.dedup_exempt());
        assert!(!EventCategory::CookieUpdate.dedup_exempt());
        assert!(!EventCategory::PushTest.dedup_exempt());
    }

    #[test]
    fn test_log_event_prefix() {
        assert_eq!(EventCategory::Checkin.log_event(), "push_checkin");
        assert_eq!(EventCategory::CookieInvalid.log_event(), "push_cookie_invalid");
        assert_eq!(EventCategory::PushTest.log_event(), "push_test");
    }
}
