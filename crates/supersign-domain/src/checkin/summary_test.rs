#[cfg(test)]
mod tests {
    use super::super::*;

    fn summary_of(outcomes: &[(&str, CheckinOutcome)]) -> RunSummary {
        let mut summary = RunSummary::new();
        for (title, outcome) in outcomes {
            summary.record(title, outcome);
        }
        summary
    }

    #[test]
    fn test_counts_sum_to_total() {
        let summary = summary_of(&[
            ("话题A", CheckinOutcome::success("签到成功")),
            ("话题B", CheckinOutcome::already("已签到")),
            ("话题C", CheckinOutcome::failed("HTTP 500")),
            ("话题D", CheckinOutcome::success("签到成功")),
        ]);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.success + summary.already + summary.failed, summary.total);
        assert_eq!(summary.success, 2);
        assert_eq!(summary.already, 1);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn test_details_preserve_order() {
        let summary = summary_of(&[
            ("first", CheckinOutcome::success("ok")),
            ("second", CheckinOutcome::failed("err")),
            ("third", CheckinOutcome::already("done")),
        ]);

        let names: Vec<&str> = summary.details.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_failed_items_carry_title_and_detail() {
        let summary = summary_of(&[("话题A", CheckinOutcome::failed("connect timeout"))]);

        assert_eq!(summary.failed_items, vec!["话题A: connect timeout"]);
    }

    #[test]
    fn test_status_success_when_no_failures() {
        let summary = summary_of(&[
            ("a", CheckinOutcome::success("ok")),
            ("b", CheckinOutcome::already("done")),
        ]);

        assert_eq!(summary.status(), RunStatus::Success);
    }

    #[test]
    fn test_status_failed_when_every_topic_failed() {
        let summary = summary_of(&[
            ("a", CheckinOutcome::failed("err")),
            ("b", CheckinOutcome::failed("err")),
        ]);

        assert_eq!(summary.status(), RunStatus::Failed);
    }

    #[test]
    fn test_status_partial_on_mixed_outcomes() {
        let summary = summary_of(&[
            ("a", CheckinOutcome::success("ok")),
            ("b", CheckinOutcome::failed("err")),
        ]);

        assert_eq!(summary.status(), RunStatus::Partial);
    }

    #[test]
    fn test_status_partial_when_only_already_and_failed() {
        // "already" counts as a non-failure, so this is partial, not fail
        let summary = summary_of(&[
            ("a", CheckinOutcome::already("done")),
            ("b", CheckinOutcome::already("done")),
            ("c", CheckinOutcome::failed("err")),
        ]);

        assert_eq!(summary.status(), RunStatus::Partial);
    }

    #[test]
    fn test_zero_topics_is_success_with_zero_total() {
        let summary = RunSummary::new();

        assert!(summary.is_empty());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.status(), RunStatus::Success);
    }
}
