//! Fluent API for building test configurations
//!
//! Produces INI text in the same layout users write, so tests exercise the
//! real parser.

use autobackup::config::{parse_ini, BackupConfig, ALERT_ADDRESS_KEY, ALERT_SECTION};
use std::fmt::Write;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Builder for creating test configurations
pub struct ConfigBuilder {
    temp_dir: TempDir,
    alert_address: Option<String>,
    sections: Vec<(String, Vec<(String, String)>)>,
}

impl ConfigBuilder {
    /// Create a builder with an alert recipient and no pairs
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
            alert_address: Some("ops@example.org".to_string()),
            sections: Vec::new(),
        }
    }

    /// Set the alert recipient (an empty string writes an empty value)
    pub fn with_alert_address(mut self, address: &str) -> Self {
        self.alert_address = Some(address.to_string());
        self
    }

    /// Leave out the alert section entirely
    pub fn without_alert_section(mut self) -> Self {
        self.alert_address = None;
        self
    }

    /// Add a backup pair
    pub fn add_pair(self, name: &str, source: &str, dest: &str) -> Self {
        self.add_section(name, &[("source", source), ("dest", dest)])
    }

    /// Add a pair whose source is a populated directory in the temp dir
    /// and whose destination is an empty path next to it
    pub fn add_local_pair(self, name: &str) -> Self {
        let source = self.temp_dir.path().join("data").join(name);
        fs::create_dir_all(&source).expect("Failed to create source dir");
        fs::write(source.join("file.txt"), name).expect("Failed to write source file");

        let dest = self.temp_dir.path().join("mirror").join(name);
        let (source, dest) = (format!("{}/", source.display()), dest.display().to_string());

        self.add_pair(name, &source, &dest)
    }

    /// Add an arbitrary section
    pub fn add_section(mut self, name: &str, entries: &[(&str, &str)]) -> Self {
        self.sections.push((
            name.to_string(),
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ));
        self
    }

    /// Render the configuration as INI text
    pub fn to_ini(&self) -> String {
        let mut ini = String::new();

        if let Some(ref address) = self.alert_address {
            writeln!(ini, "[{}]\n{} = {}\n", ALERT_SECTION, ALERT_ADDRESS_KEY, address).unwrap();
        }

        for (name, entries) in &self.sections {
            writeln!(ini, "[{}]", name).unwrap();
            for (key, value) in entries {
                writeln!(ini, "{} = {}", key, value).unwrap();
            }
            ini.push('\n');
        }

        ini
    }

    /// Build the validated configuration
    pub fn build(self) -> BackupConfig {
        self.try_build().expect("Failed to build config")
    }

    /// Build, returning validation errors
    pub fn try_build(&self) -> autobackup::config::Result<BackupConfig> {
        BackupConfig::from_ini(parse_ini(&self.to_ini())?)
    }

    /// Write the configuration to a file, returning its path and the temp dir
    pub fn persist(self) -> (PathBuf, TempDir) {
        let path = self.temp_dir.path().join("autobackup.cfg");
        fs::write(&path, self.to_ini()).expect("Failed to write config");
        (path, self.temp_dir)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
