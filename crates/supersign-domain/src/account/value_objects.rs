use serde::{Deserialize, Serialize};

/// Weibo session cookie set, harvested out-of-band by the desktop uploader.
/// `SUB` and `SUBP` are mandatory, `_T_WM` is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieBundle {
    sub: String,
    subp: String,
    twm: Option<String>,
}

impl CookieBundle {
    pub fn new(sub: impl Into<String>, subp: impl Into<String>, twm: Option<String>) -> Self {
        Self {
            sub: sub.into(),
            subp: subp.into(),
            twm: twm.filter(|t| !t.is_empty()),
        }
    }

    pub fn empty() -> Self {
        Self::new("", "", None)
    }

    /// Both mandatory fields present. Incomplete bundles never reach the wire.
    pub fn is_complete(&self) -> bool {
        !self.sub.is_empty() && !self.subp.is_empty()
    }

    /// Cookie header value: `SUB=..; SUBP=..`, plus `; _T_WM=..` when set.
    pub fn header_value(&self) -> String {
        let mut parts = vec![format!("SUB={}", self.sub), format!("SUBP={}", self.subp)];
        if let Some(twm) = &self.twm {
            parts.push(format!("_T_WM={}", twm));
        }
        parts.join("; ")
    }

    pub fn sub(&self) -> &str {
        &self.sub
    }

    pub fn subp(&self) -> &str {
        &self.subp
    }

    pub fn twm(&self) -> Option<&str> {
        self.twm.as_deref()
    }
}

/// Daily trigger configuration. `time` is `HH:MM` in the service timezone;
/// a fired job additionally sleeps a uniform random delay in
/// `[0, jitter_secs]` before running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub enabled: bool,
    pub time: String,
    pub jitter_secs: u32,
}

impl ScheduleConfig {
    pub fn daily_at(time: impl Into<String>, jitter_secs: u32) -> Self {
        Self {
            enabled: true,
            time: time.into(),
            jitter_secs,
        }
    }

    /// Parsed trigger time. Malformed strings fall back to 08:00.
    pub fn hour_minute(&self) -> (u32, u32) {
        parse_hhmm(&self.time).unwrap_or((8, 0))
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            time: "08:00".to_string(),
            jitter_secs: 300,
        }
    }
}

fn parse_hhmm(s: &str) -> Option<(u32, u32)> {
    let (h, m) = s.split_once(':')?;
    let hour: u32 = h.trim().parse().ok()?;
    let minute: u32 = m.trim().parse().ok()?;
    (hour <= 23 && minute <= 59).then_some((hour, minute))
}

/// Per-account execution policy for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunPolicy {
    /// Attempt ceiling per topic, at least 1.
    pub retry_count: u32,
    /// Delay between consecutive topics, in seconds.
    pub request_interval_secs: f64,
}

impl Default for RunPolicy {
    fn default() -> Self {
        Self {
            retry_count: 3,
            request_interval_secs: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_header_with_and_without_twm() {
        let full = CookieBundle::new("s1", "s2", Some("t1".to_string()));
        assert_eq!(full.header_value(), "SUB=s1; SUBP=s2; _T_WM=t1");

        let partial = CookieBundle::new("s1", "s2", None);
        assert_eq!(partial.header_value(), "SUB=s1; SUBP=s2");

        // Empty _T_WM is dropped, not sent blank
        let blank = CookieBundle::new("s1", "s2", Some(String::new()));
        assert_eq!(blank.header_value(), "SUB=s1; SUBP=s2");
    }

    #[test]
    fn test_cookie_completeness() {
        assert!(CookieBundle::new("a", "b", None).is_complete());
        assert!(!CookieBundle::new("", "b", None).is_complete());
        assert!(!CookieBundle::new("a", "", None).is_complete());
        assert!(!CookieBundle::empty().is_complete());
    }

    #[test]
    fn test_schedule_time_parse() {
        assert_eq!(ScheduleConfig::daily_at("23:59", 0).hour_minute(), (23, 59));
        assert_eq!(ScheduleConfig::daily_at("07:05", 0).hour_minute(), (7, 5));
    }

    #[test]
    fn test_schedule_time_parse_falls_back() {
        assert_eq!(ScheduleConfig::daily_at("not a time", 0).hour_minute(), (8, 0));
        assert_eq!(ScheduleConfig::daily_at("25:00", 0).hour_minute(), (8, 0));
        assert_eq!(ScheduleConfig::daily_at("12:61", 0).hour_minute(), (8, 0));
        assert_eq!(ScheduleConfig::daily_at("", 0).hour_minute(), (8, 0));
    }
}
