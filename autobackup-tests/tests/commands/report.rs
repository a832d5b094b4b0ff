//! Tests for the failure report sent at the end of a run

use autobackup::managers::notification::{Notifier, ReportError, ReportMailer};
use lettre::transport::stub::StubTransport;
use std::fs;
use test_utils::{
    BackupManager, ConfigBuilder, LogSession, MirrorRunner, MockExecutor, MockResponse,
    RunSummary, TestContext,
};

fn stub_mailer() -> ReportMailer<StubTransport> {
    ReportMailer::new(StubTransport::new_ok(), "localhost").with_identity("backup", "workstation")
}

#[test]
fn test_failed_run_emails_summary_log() {
    let ctx = TestContext::new();
    let session = LogSession::scoped(&ctx.log_dir()).unwrap();
    let executor = MockExecutor::new()
        .push_response(MockResponse::failure(12, "rsync: connection unexpectedly closed"))
        .push_response(MockResponse::success("big chatter only in the detailed log"));

    let config = ConfigBuilder::new()
        .with_alert_address("admin@example.org")
        .add_pair("home", "/home/", "nas:/home")
        .add_pair("etc", "/etc/", "nas:/etc")
        .build();
    let manager = BackupManager::with_components(config, MirrorRunner::new(executor), stub_mailer());

    let summary = manager.run(&session);
    assert_eq!(summary.exit_code(), 1);

    let messages = manager.notifier().transport().messages();
    assert_eq!(messages.len(), 1);

    let raw = &messages[0].1;
    assert!(raw.contains("Subject: [backup@workstation]: ended with errors"));
    assert!(raw.contains("From: backup@localhost"));
    assert!(raw.contains("To: admin@example.org"));
    assert!(raw.contains("rsync: connection unexpectedly closed"));
    assert!(raw.contains("1 error occurred"));
    assert!(!raw.contains("big chatter only in the detailed log"));
}

#[test]
fn test_successful_run_sends_nothing() {
    let ctx = TestContext::new();
    let session = LogSession::scoped(&ctx.log_dir()).unwrap();

    let config = ConfigBuilder::new().add_pair("home", "/home/", "nas:/home").build();
    let manager = BackupManager::with_components(
        config,
        MirrorRunner::new(MockExecutor::new()),
        stub_mailer(),
    );

    let summary = manager.run(&session);

    assert_eq!(summary.exit_code(), 0);
    assert!(manager.notifier().transport().messages().is_empty());
}

#[test]
fn test_unreachable_mail_server_keeps_exit_code() {
    let ctx = TestContext::new();
    let session = LogSession::scoped(&ctx.log_dir()).unwrap();
    let executor = MockExecutor::new().push_response(MockResponse::failure(10, "socket error"));

    let config = ConfigBuilder::new().add_pair("home", "/home/", "nas:/home").build();
    let mailer = ReportMailer::new(StubTransport::new_error(), "localhost");
    let manager = BackupManager::with_components(config, MirrorRunner::new(executor), mailer);

    let summary = manager.run(&session);
    assert_eq!(summary.exit_code(), 1);

    let log = fs::read_to_string(session.summary_path()).unwrap();
    assert!(log.contains("Failed to send backup report to ops@example.org"));
}

#[test]
fn test_missing_summary_log_is_an_error() {
    let ctx = TestContext::new();
    let mut summary = RunSummary::new(
        &ctx.temp_dir().join("gone_backup-full.log"),
        &ctx.temp_dir().join("gone_backup.log"),
    );
    summary.failed = 1;

    let result = stub_mailer().send_report("ops@example.org", &summary);
    assert!(matches!(result, Err(ReportError::SummaryNotFound(_))));
}
