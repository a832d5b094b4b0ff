//! Unit tests for configuration loading and validation
//!
//! These tests verify INI parsing, alert section extraction and pair validation.

use autobackup::config::{load_config, load_ini, ConfigError};
use test_utils::{config_without_alert_ini, sample_config_ini, ConfigBuilder, TestContext};
use test_utils::test_context::ResultAssertions;

#[test]
fn test_config_loading_valid() {
    let ctx = TestContext::new();
    let config_path = ctx.create_file("autobackup.cfg", sample_config_ini());

    let config = load_config(&config_path).assert_ok();

    assert_eq!(config.alert_address, "admin@example.org");
    assert_eq!(config.pairs.len(), 2);
    assert_eq!(config.pairs[0].name, "home");
    assert_eq!(config.pairs[0].dest, "backup@nas:/volume1/workstation/home");
    assert_eq!(config.pairs[1].source, "/etc/");
}

#[test]
fn test_raw_document_keeps_alert_section() {
    let ctx = TestContext::new();
    let config_path = ctx.create_file("autobackup.cfg", sample_config_ini());

    let document = load_ini(&config_path).assert_ok();
    assert_eq!(document.section_names(), vec!["alert_email", "home", "etc"]);
    assert_eq!(
        document.section("alert_email").and_then(|s| s.get("address")),
        Some("admin@example.org")
    );
}

#[test]
fn test_config_missing_file() {
    let ctx = TestContext::new();
    let result = load_config(ctx.temp_dir().join("nope.cfg"));
    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

#[test]
fn test_config_missing_alert_section() {
    let ctx = TestContext::new();
    let config_path = ctx.create_file("autobackup.cfg", config_without_alert_ini());

    load_config(&config_path).assert_err_contains("alert_email");
}

#[test]
fn test_config_missing_alert_address() {
    let result = ConfigBuilder::new()
        .with_alert_address("")
        .add_pair("home", "/home", "/mnt/home")
        .try_build();

    assert!(matches!(result, Err(ConfigError::MissingAlertAddress)));
}

#[test]
fn test_alert_section_without_address_key() {
    let result = ConfigBuilder::new()
        .without_alert_section()
        .add_section("alert_email", &[("recipient", "ops@example.org")])
        .try_build();

    assert!(matches!(result, Err(ConfigError::MissingAlertAddress)));
}

#[test]
fn test_config_pair_missing_source() {
    let result = ConfigBuilder::new()
        .add_section("broken", &[("dest", "/mnt/broken")])
        .try_build();

    result.assert_err_contains("'broken': missing or empty 'source'");
}

#[test]
fn test_config_no_pairs() {
    let config = ConfigBuilder::new().build();
    assert!(config.pairs.is_empty());
    assert_eq!(config.alert_address, "ops@example.org");
}

#[test]
fn test_config_malformed() {
    let ctx = TestContext::new();
    let config_path = ctx.create_file("autobackup.cfg", "source = /home\n[home]\n");

    let result = load_config(&config_path);
    assert!(matches!(result, Err(ConfigError::Malformed(_))));
}

#[test]
fn test_pairs_keep_file_order() {
    let config = ConfigBuilder::new()
        .add_pair("zeta", "/z", "/mnt/z")
        .add_pair("alpha", "/a", "/mnt/a")
        .add_pair("mid", "/m", "/mnt/m")
        .build();

    let names: Vec<_> = config.pairs.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_config_duplicate_key() {
    let result = ConfigBuilder::new()
        .add_section("home", &[("source", "/home"), ("source", "/srv"), ("dest", "/mnt/home")])
        .try_build();

    result.assert_err_contains("'home': key 'source' is defined more than once");
}

#[test]
fn test_config_duplicate_section() {
    let result = ConfigBuilder::new()
        .add_pair("home", "/home", "/mnt/home")
        .add_pair("home", "/srv", "/mnt/srv")
        .try_build();

    assert!(matches!(result, Err(ConfigError::DuplicateSection(name)) if name == "home"));
}
