#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::checkin::RunStatus;

    #[test]
    fn test_create_account() {
        let account = Account::new("主号".to_string()).unwrap();

        assert_eq!(account.name(), "主号");
        assert!(!account.credentials().is_complete());
        assert!(!account.schedule().enabled);
        assert_eq!(account.policy().retry_count, 3);
        assert!(account.sendkey().is_none());
        assert!(account.last_run_status().is_none());
    }

    #[test]
    fn test_create_account_trims_name() {
        let account = Account::new("  main  ".to_string()).unwrap();
        assert_eq!(account.name(), "main");
    }

    #[test]
    fn test_create_account_rejects_empty_name() {
        assert!(Account::new("".to_string()).is_err());
        assert!(Account::new("   ".to_string()).is_err());
    }

    #[test]
    fn test_update_credentials_requires_complete_bundle() {
        let mut account = Account::new("main".to_string()).unwrap();

        let result = account.update_credentials(CookieBundle::new("sub-only", "", None));
        assert!(result.is_err());
        assert!(account.cookie_updated_at().is_none());

        account
            .update_credentials(CookieBundle::new("sub", "subp", Some("twm".to_string())))
            .unwrap();
        assert!(account.credentials().is_complete());
        assert!(account.cookie_updated_at().is_some());
    }

    #[test]
    fn test_update_policy_rejects_zero_retries() {
        let mut account = Account::new("main".to_string()).unwrap();

        let result = account.update_policy(RunPolicy {
            retry_count: 0,
            request_interval_secs: 2.0,
        });
        assert!(result.is_err());
        assert_eq!(account.policy().retry_count, 3); // Policy should not change
    }

    #[test]
    fn test_set_sendkey_drops_empty() {
        let mut account = Account::new("main".to_string()).unwrap();

        account.set_sendkey(Some("SCT123".to_string()));
        assert_eq!(account.sendkey(), Some("SCT123"));

        account.set_sendkey(Some(String::new()));
        assert!(account.sendkey().is_none());
    }

    #[test]
    fn test_record_run_updates_status_and_timestamp() {
        let mut account = Account::new("main".to_string()).unwrap();

        account.record_run(RunStatus::Partial);

        assert_eq!(account.last_run_status(), Some(RunStatus::Partial));
        assert!(account.last_run_at().is_some());
    }
}
