//! Autobackup Library
//!
//! This library provides rsync-based backup orchestration with email alerts.

pub mod config;
pub mod managers;
pub mod utils;

// Re-export commonly used types
pub use config::{load_config, BackupConfig, BackupPair, MailSettings};
pub use managers::backup::{BackupManager, RunSummary};
pub use managers::logging::LogSession;
pub use managers::notification::{Notifier, ReportMailer};
pub use utils::mirror::{MirrorResult, MirrorRunner};
