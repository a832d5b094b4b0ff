use std::path::PathBuf;

/// Section holding the failure-alert recipient
pub const ALERT_SECTION: &str = "alert_email";

/// Key inside [`ALERT_SECTION`] holding the recipient address
pub const ALERT_ADDRESS_KEY: &str = "address";

pub const SOURCE_KEY: &str = "source";
pub const DEST_KEY: &str = "dest";

/// Raw INI content: sections in file order, entries in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    pub sections: Vec<IniSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniSection {
    pub name: String,
    pub entries: Vec<(String, String)>,
}

impl IniSection {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    /// Look up a key (exact match)
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl IniDocument {
    /// Get a section by name (exact match)
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Remove a section, returning it if it was present
    pub fn remove_section(&mut self, name: &str) -> Option<IniSection> {
        let index = self.sections.iter().position(|s| s.name == name)?;
        Some(self.sections.remove(index))
    }

    pub fn section_names(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Validated backup configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupConfig {
    /// Recipient of the failure report
    pub alert_address: String,
    /// Backup pairs in file order
    pub pairs: Vec<BackupPair>,
}

/// One source/destination combination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupPair {
    /// Section name the pair was read from
    pub name: String,
    pub source: String,
    /// Local path or remote-shell target (`user@host:path`)
    pub dest: String,
}

impl BackupPair {
    pub fn new(name: &str, source: &str, dest: &str) -> Self {
        Self {
            name: name.to_string(),
            source: source.to_string(),
            dest: dest.to_string(),
        }
    }
}

/// Mail transport settings for the failure report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSettings {
    /// Mail transport agent host, also used as the sender's domain
    pub server: String,
    pub port: u16,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            server: default_mail_server(),
            port: default_mail_port(),
        }
    }
}

// Default value functions

fn default_mail_server() -> String { "localhost".to_string() }
fn default_mail_port() -> u16 { 25 }

pub fn default_log_directory() -> PathBuf {
    super::expand_tilde(&PathBuf::from("~/.autobackup/logs"))
}
