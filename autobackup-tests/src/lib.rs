//! Test utilities for autobackup
//!
//! This crate provides shared test utilities, mock implementations,
//! and helper functions for testing the autobackup application.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_utils::{ConfigBuilder, TestContext, MockExecutor};
//!
//! #[test]
//! fn my_test() {
//!     let ctx = TestContext::new();
//!     let config = ConfigBuilder::new()
//!         .add_pair("home", "/home", "nas:/home")
//!         .build();
//!     // ... test code
//! }
//! ```

pub mod config_builder;
pub mod fixtures;
pub mod test_context;

// Re-export commonly used items
pub use config_builder::ConfigBuilder;
pub use fixtures::*;
pub use test_context::TestContext;

// Re-export types from the main crate for convenience
pub use autobackup::config::{BackupConfig, BackupPair, MailSettings};
pub use autobackup::managers::backup::{BackupManager, RunSummary};
pub use autobackup::managers::logging::LogSession;
pub use autobackup::utils::mirror::{MirrorResult, MirrorRunner};

// Re-export mock implementations from the main crate
pub use autobackup::managers::notification::mock::{MockNotifier, SentReport};
pub use autobackup::managers::notification::Notifier;
pub use autobackup::utils::executor::mock::{CommandCall, MockExecutor, MockResponse};
pub use autobackup::utils::executor::MirrorExecutor;

/// Common test result type
pub type TestResult<T = ()> = anyhow::Result<T>;
