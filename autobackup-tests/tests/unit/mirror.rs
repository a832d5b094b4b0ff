//! Unit tests for the mirror runner
//!
//! These tests run a shell script standing in for rsync.

use autobackup::utils::mirror::{MirrorError, MirrorRunner};
use serial_test::serial;
use test_utils::{clean_result, fake_rsync_script, no_space_stderr, TestContext};

#[test]
fn test_clean_result_predicates() {
    let result = clean_result();
    assert!(!result.has_errors());
    assert!(!result.has_no_space_error());
}

#[cfg(unix)]
#[test]
#[serial]
fn test_runner_invokes_executable_with_flags() {
    let ctx = TestContext::new();
    let script = ctx.create_executable("rsync", &fake_rsync_script(0, ""));

    let runner = MirrorRunner::default().with_executable(script.to_str().unwrap());
    let result = runner.run("/data/", "backup:/data").unwrap();

    assert!(!result.has_errors());
    assert_eq!(result.stdout.trim_end(), "-a -v --delete /data/ backup:/data");
    assert!(result.stderr.is_empty());
}

#[cfg(unix)]
#[test]
#[serial]
fn test_runner_reports_non_zero_exit() {
    let ctx = TestContext::new();
    let script = ctx.create_executable("rsync", &fake_rsync_script(11, no_space_stderr()));

    let runner = MirrorRunner::default().with_executable(script.to_str().unwrap());
    let result = runner.run("/data/", "/mnt/full").unwrap();

    assert_eq!(result.status, 11);
    assert!(result.has_errors());
    assert!(result.has_no_space_error());
    assert_eq!(result.stderr, no_space_stderr());
}

#[cfg(unix)]
#[test]
#[serial]
fn test_runner_custom_flags() {
    let ctx = TestContext::new();
    let script = ctx.create_executable("rsync", &fake_rsync_script(0, ""));

    let runner = MirrorRunner::default()
        .with_executable(script.to_str().unwrap())
        .with_flags(&["--archive", "--one-file-system"]);
    let result = runner.run("src", "dst").unwrap();

    assert_eq!(result.stdout.trim_end(), "--archive --one-file-system src dst");
}

#[test]
fn test_runner_missing_executable() {
    let runner = MirrorRunner::default().with_executable("autobackup-missing-rsync");

    let result = runner.run("/data", "/mnt/data");
    assert!(matches!(result, Err(MirrorError::ExecutableNotFound(exe)) if exe == "autobackup-missing-rsync"));
}
