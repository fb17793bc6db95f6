//! Tests for the run module.

use super::*;

use std::time::{Duration, UNIX_EPOCH};

use presence_watch::config::Cli;

fn config(extra: &[&str]) -> ValidatedConfig {
    let mut args = vec![
        "presence-watch",
        "--user-id",
        "42",
        "--url",
        "https://example.com/hook",
    ];
    args.extend_from_slice(extra);
    ValidatedConfig::from_raw(&Cli::parse_from_iter(args), None).unwrap()
}

fn client() -> ReqwestClient {
    ReqwestClient::with_timeout(Duration::from_secs(5)).unwrap()
}

mod notifier_selection {
    use super::*;

    #[test]
    fn dry_run_selects_log_notifier() {
        let notifier = create_notifier(&config(&["--dry-run"]), client());
        assert!(matches!(notifier, AppNotifier::DryRun(_)));
    }

    #[test]
    fn http_notifier_carries_url_and_method() {
        let notifier = create_notifier(&config(&["--method", "PUT"]), client());

        match notifier {
            AppNotifier::Http(inner) => {
                assert_eq!(inner.url().as_str(), "https://example.com/hook");
                assert_eq!(inner.method(), &http::Method::PUT);
            }
            AppNotifier::DryRun(_) => panic!("expected HTTP notifier"),
        }
    }

    #[tokio::test]
    async fn dry_run_notifier_always_succeeds() {
        let notifier = create_notifier(&config(&["--dry-run"]), client());
        let notification = Notification::new("Presence Changed", UNIX_EPOCH);

        assert!(notifier.notify(&notification).await.is_ok());
    }
}

#[test]
fn run_error_displays_source() {
    let source = reqwest::Client::builder()
        .user_agent("bad\nagent")
        .build()
        .unwrap_err();
    let error = RunError::HttpClient(source);

    assert!(error.to_string().starts_with("Failed to create HTTP client"));
}
