//! Configuration module for autobackup
//!
//! This module handles loading and validating the INI configuration file.
//!
//! ## File Layout
//!
//! One reserved section holds the failure-alert recipient; every other
//! section is a backup pair, processed in file order:
//!
//! ```ini
//! [alert_email]
//! address = admin@example.org
//!
//! [home]
//! source = /home/
//! dest = backup@nas:/volume1/home
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use autobackup::config;
//!
//! let config = config::load_config("/usr/local/etc/autobackup.cfg")?;
//!
//! for pair in &config.pairs {
//!     println!("{}: {} -> {}", pair.name, pair.source, pair.dest);
//! }
//! # Ok::<(), config::ConfigError>(())
//! ```

mod loader;
mod types;

pub use loader::{load_config, load_ini, parse_ini, ConfigError, Result};
pub use types::*;

use std::path::{Path, PathBuf};

/// Name of the configuration file under `<prefix>/etc`
pub const CONFIG_FILE_NAME: &str = "autobackup.cfg";

const FALLBACK_PREFIX: &str = "/usr/local";

/// Default configuration path, relative to the installation prefix
///
/// The prefix is the parent of the directory holding the running
/// executable, so `/usr/local/bin/autobackup` reads
/// `/usr/local/etc/autobackup.cfg`.
pub fn default_config_path() -> PathBuf {
    let prefix = std::env::current_exe()
        .ok()
        .and_then(|exe| installation_prefix(&exe))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_PREFIX));

    config_path_for_prefix(&prefix)
}

fn installation_prefix(exe: &Path) -> Option<PathBuf> {
    exe.parent()?.parent().map(Path::to_path_buf)
}

fn config_path_for_prefix(prefix: &Path) -> PathBuf {
    prefix.join("etc").join(CONFIG_FILE_NAME)
}

/// Expand tilde (~) in path
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}
