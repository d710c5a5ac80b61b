use std::collections::HashMap;
use std::path::PathBuf;

use chrono_tz::Tz;
use log::warn;

use supersign_domain::checkin::StrategyKind;

/// Process configuration read from the environment (the daemon loads `.env`
/// before constructing this).
#[derive(Debug, Clone)]
pub struct Settings {
    /// System-wide fallback ServerChan sendkey. Accounts without their own
    /// key deliver here; empty means log-only dispatch.
    pub default_sendkey: Option<String>,
    /// Wire-protocol variant used for every run.
    pub strategy: StrategyKind,
    /// Operator-captured extra API params merged into api.weibo.cn queries.
    pub api_params: HashMap<String, String>,
    /// Trigger timezone for the scheduler.
    pub timezone: Tz,
    /// Directory for rolling log files.
    pub log_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> Self {
        let default_sendkey = std::env::var("DEFAULT_SENDKEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let strategy = StrategyKind::parse(
            &std::env::var("CHECKIN_PROVIDER").unwrap_or_default(),
        );

        let api_params = std::env::var("WEIBO_API_PARAMS")
            .map(|raw| parse_api_params(&raw))
            .unwrap_or_default();

        let timezone = std::env::var("TZ")
            .ok()
            .and_then(|tz| match tz.parse::<Tz>() {
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    warn!("Unrecognized TZ value '{}', using Asia/Shanghai", tz);
                    None
                }
            })
            .unwrap_or(chrono_tz::Asia::Shanghai);

        let log_dir = std::env::var("SUPERSIGN_LOG_DIR")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::data_local_dir().map(|d| d.join("supersign").join("logs")))
            .unwrap_or_else(|| PathBuf::from("logs"));

        Self {
            default_sendkey,
            strategy,
            api_params,
            timezone,
            log_dir,
        }
    }
}

/// Parse the captured-params JSON object into query-string pairs. Scalar
/// values are stringified; anything unparseable yields an empty map, same as
/// a missing variable.
fn parse_api_params(raw: &str) -> HashMap<String, String> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!("WEIBO_API_PARAMS is not valid JSON ({}), ignoring", e);
            return HashMap::new();
        }
    };

    let Some(object) = value.as_object() else {
        warn!("WEIBO_API_PARAMS is not a JSON object, ignoring");
        return HashMap::new();
    };

    object
        .iter()
        .map(|(k, v)| {
            let s = match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.clone(), s)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_params_object() {
        let params = parse_api_params(r#"{"from": "10A1295010", "c": "iphone", "v_p": 89}"#);
        assert_eq!(params.get("from").map(String::as_str), Some("10A1295010"));
        assert_eq!(params.get("c").map(String::as_str), Some("iphone"));
        assert_eq!(params.get("v_p").map(String::as_str), Some("89"));
    }

    #[test]
    fn test_parse_api_params_garbage_yields_empty() {
        assert!(parse_api_params("not json").is_empty());
        assert!(parse_api_params("[1,2,3]").is_empty());
        assert!(parse_api_params("").is_empty());
    }
}
