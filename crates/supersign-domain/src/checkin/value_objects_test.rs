#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_outcome_constructors() {
        let ok = CheckinOutcome::success("签到成功");
        assert_eq!(ok.status, CheckinStatus::Success);
        assert!(!ok.is_failed());

        let already = CheckinOutcome::already("今日已签到");
        assert_eq!(already.status, CheckinStatus::Already);
        assert!(!already.is_failed());

        let failed = CheckinOutcome::failed("connection reset");
        assert_eq!(failed.status, CheckinStatus::Failed);
        assert!(failed.is_failed());
        assert_eq!(failed.detail, "connection reset");
    }

    #[test]
    fn test_status_strings_match_persisted_values() {
        assert_eq!(CheckinStatus::Success.as_str(), "success");
        assert_eq!(CheckinStatus::Already.as_str(), "already");
        assert_eq!(CheckinStatus::Failed.as_str(), "failed");
    }

    #[test]
    fn test_status_icons() {
        assert_eq!(CheckinStatus::Success.icon(), "✅");
        assert_eq!(CheckinStatus::Already.icon(), "☑️");
        assert_eq!(CheckinStatus::Failed.icon(), "❌");
    }

    #[test]
    fn test_topic_construction() {
        let topic = Topic::new("肖战", "1008084989d223", "sinaweibo://pageinfo?containerid=1008084989d223");
        assert_eq!(topic.title, "肖战");
        assert_eq!(topic.container_id, "1008084989d223");
        assert!(topic.action.starts_with("sinaweibo://"));
    }
}
