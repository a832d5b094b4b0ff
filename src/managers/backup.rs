//! Backup manager - orchestrates backup execution

use crate::config::{BackupConfig, BackupPair, MailSettings};
use crate::managers::logging::LogSession;
use crate::managers::notification::{Notifier, ReportMailer};
use crate::utils::executor::{MirrorExecutor, RealExecutor};
use crate::utils::mirror::{describe_exit_code, MirrorResult, MirrorRunner};
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Separator written around each pair in the logs
pub const DIVIDER: &str = "------------------------------------------------------------";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Pairs the mirror tool was attempted for
    pub attempted: usize,
    /// Pairs that failed (non-zero exit or launch failure)
    pub failed: usize,
    pub detailed_log: PathBuf,
    pub summary_log: PathBuf,
}

impl RunSummary {
    pub fn new(detailed_log: &Path, summary_log: &Path) -> Self {
        Self {
            attempted: 0,
            failed: 0,
            detailed_log: detailed_log.to_path_buf(),
            summary_log: summary_log.to_path_buf(),
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Process exit status for this run
    pub fn exit_code(&self) -> i32 {
        if self.has_failures() {
            1
        } else {
            0
        }
    }
}

/// Aggregate failure message, e.g. "1 error occurred" or "3 errors occurred"
pub fn errors_occurred(count: usize) -> String {
    if count == 1 {
        "1 error occurred".to_string()
    } else {
        format!("{} errors occurred", count)
    }
}

pub struct BackupManager<E: MirrorExecutor = RealExecutor, N: Notifier = ReportMailer> {
    config: BackupConfig,
    runner: MirrorRunner<E>,
    notifier: N,
}

impl BackupManager {
    /// Create a backup manager running rsync and reporting over SMTP
    pub fn new(config: BackupConfig, mail: &MailSettings) -> Self {
        Self::with_components(config, MirrorRunner::default(), ReportMailer::smtp(mail))
    }
}

impl<E: MirrorExecutor, N: Notifier> BackupManager<E, N> {
    /// Create a backup manager with a specific runner and notifier
    pub fn with_components(config: BackupConfig, runner: MirrorRunner<E>, notifier: N) -> Self {
        Self {
            config,
            runner,
            notifier,
        }
    }

    pub fn config(&self) -> &BackupConfig {
        &self.config
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Run every pair in order and report failures
    ///
    /// Pairs are processed one at a time; a failed pair is counted and the
    /// next one is attempted. The notifier is called once, and only when at
    /// least one pair failed.
    pub fn run(&self, session: &LogSession) -> RunSummary {
        let mut summary = RunSummary::new(session.detailed_path(), session.summary_path());

        info!("Backup started at {}", Local::now().format(TIME_FORMAT));
        debug!("Detailed log: {}", summary.detailed_log.display());

        for pair in &self.config.pairs {
            info!("{}", DIVIDER);
            summary.attempted += 1;
            if !self.backup_pair(pair) {
                summary.failed += 1;
            }
        }

        if summary.attempted > 0 {
            info!("{}", DIVIDER);
        }

        if summary.has_failures() {
            error!("{}", errors_occurred(summary.failed));
            self.report(&summary);
        } else {
            info!("Backup successful");
            info!("Backup ended at {}", Local::now().format(TIME_FORMAT));
        }

        summary
    }

    /// Synchronize one pair, returning whether it succeeded
    fn backup_pair(&self, pair: &BackupPair) -> bool {
        info!("Syncing '{}': {} -> {}", pair.name, pair.source, pair.dest);

        match self.runner.run(&pair.source, &pair.dest) {
            Ok(result) if result.has_errors() => {
                error!(
                    "Failed to sync {} -> {} ({}):\n{}",
                    pair.source,
                    pair.dest,
                    status_description(&result),
                    result.stderr.trim_end()
                );
                if result.has_no_space_error() {
                    error!("No space left on destination {}", pair.dest);
                }
                false
            }
            Ok(result) => {
                debug!("{}", result.stdout.trim_end());
                info!("{} -> {}: done", pair.source, pair.dest);
                true
            }
            Err(e) => {
                error!("Failed to sync {} -> {}: {}", pair.source, pair.dest, e);
                false
            }
        }
    }

    fn report(&self, summary: &RunSummary) {
        info!("Sending report to {}", self.config.alert_address);

        match self.notifier.send_report(&self.config.alert_address, summary) {
            Ok(true) => {}
            Ok(false) => warn!("Backup report was not delivered"),
            Err(e) => error!("Failed to send backup report: {}", e),
        }
    }
}

fn status_description(result: &MirrorResult) -> String {
    match describe_exit_code(result.status) {
        Some(meaning) => format!("exit status {}: {}", result.status, meaning),
        None => format!("exit status {}", result.status),
    }
}
