//! Test fixtures and sample data
//!
//! Provides pre-built test data and templates for testing.

use autobackup::utils::mirror::MirrorResult;

/// Config with two pairs, one local and one remote-shell destination
pub fn sample_config_ini() -> &'static str {
    r#"
; workstation backups
[alert_email]
address = admin@example.org

[home]
source = /home/
dest = backup@nas:/volume1/workstation/home

[etc]
source = /etc/
dest = /mnt/backup/etc
"#
}

/// Config without the reserved alert section
pub fn config_without_alert_ini() -> &'static str {
    r#"
[home]
source = /home/
dest = /mnt/backup/home
"#
}

/// stderr rsync prints when the destination filesystem is full
pub fn no_space_stderr() -> &'static str {
    "rsync: write failed on \"/mnt/backup/big.iso\": No space left on device (28)\nrsync error: error in file IO (code 11) at receiver.c(374) [receiver=3.2.7]\n"
}

/// A clean rsync result
pub fn clean_result() -> MirrorResult {
    MirrorResult::new(
        0,
        "sending incremental file list\n./\nfile.txt\n\nsent 120 bytes  received 38 bytes\n",
        "",
    )
}

/// Shell script standing in for rsync
///
/// Echoes its arguments, writes `stderr` to standard error and exits with
/// `exit_code`.
pub fn fake_rsync_script(exit_code: i32, stderr: &str) -> String {
    format!(
        "#!/bin/sh\necho \"$@\"\nprintf '%s' '{}' >&2\nexit {}\n",
        stderr.replace('\'', "'\\''"),
        exit_code
    )
}
