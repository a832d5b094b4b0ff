use super::types::*;
use ini::{Ini, ParseOption};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Malformed(String),

    #[error("Section '{0}' is defined more than once")]
    DuplicateSection(String),

    #[error("Section '{section}': key '{key}' is defined more than once")]
    DuplicateKey { section: String, key: String },

    #[error("Missing [{}] section", ALERT_SECTION)]
    MissingAlertSection,

    #[error("Missing or empty '{}' in [{}] section", ALERT_ADDRESS_KEY, ALERT_SECTION)]
    MissingAlertAddress,

    #[error("Section '{section}': missing or empty '{key}'")]
    MissingKey { section: String, key: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Load and validate the backup configuration from an INI file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<BackupConfig> {
    let document = load_ini(path)?;
    BackupConfig::from_ini(document)
}

/// Parse an INI file into ordered sections
pub fn load_ini<P: AsRef<Path>>(path: P) -> Result<IniDocument> {
    let path = path.as_ref();
    let ini = Ini::load_from_file_opt(path, parse_options()).map_err(|e| match e {
        ini::Error::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
            ConfigError::NotFound(path.to_path_buf())
        }
        ini::Error::Io(io) => ConfigError::ReadError(io),
        ini::Error::Parse(parse) => ConfigError::Malformed(parse.to_string()),
    })?;
    into_document(ini)
}

/// Parse INI text into ordered sections
pub fn parse_ini(contents: &str) -> Result<IniDocument> {
    let ini = Ini::load_from_str_opt(contents, parse_options())
        .map_err(|e| ConfigError::Malformed(e.to_string()))?;
    into_document(ini)
}

// Backslashes are kept verbatim so Windows-style paths survive.
fn parse_options() -> ParseOption {
    ParseOption {
        enabled_escape: false,
        ..ParseOption::default()
    }
}

fn into_document(ini: Ini) -> Result<IniDocument> {
    let mut document = IniDocument::default();

    for (name, properties) in ini.iter() {
        let Some(name) = name else {
            if properties.iter().next().is_some() {
                return Err(ConfigError::Malformed(
                    "entries found before the first section header".to_string(),
                ));
            }
            continue;
        };

        if document.section(name).is_some() {
            return Err(ConfigError::DuplicateSection(name.to_string()));
        }

        let mut section = IniSection::new(name);
        for (key, value) in properties.iter() {
            if section.get(key).is_some() {
                return Err(ConfigError::DuplicateKey {
                    section: name.to_string(),
                    key: key.to_string(),
                });
            }
            section.entries.push((key.to_string(), value.trim().to_string()));
        }
        document.sections.push(section);
    }

    Ok(document)
}

impl BackupConfig {
    /// Build the typed configuration, extracting the alert section
    pub fn from_ini(mut document: IniDocument) -> Result<Self> {
        let alert = document
            .remove_section(ALERT_SECTION)
            .ok_or(ConfigError::MissingAlertSection)?;

        let alert_address = alert
            .get(ALERT_ADDRESS_KEY)
            .filter(|address| !address.is_empty())
            .ok_or(ConfigError::MissingAlertAddress)?
            .to_string();

        let pairs = document
            .sections
            .iter()
            .map(validate_pair)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            alert_address,
            pairs,
        })
    }
}

fn validate_pair(section: &IniSection) -> Result<BackupPair> {
    let required = |key: &str| {
        section
            .get(key)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ConfigError::MissingKey {
                section: section.name.clone(),
                key: key.to_string(),
            })
    };

    let source = required(SOURCE_KEY)?;
    let dest = required(DEST_KEY)?;

    Ok(BackupPair::new(&section.name, source, dest))
}
