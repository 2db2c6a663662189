//! Tests for configuration loading and priority resolution
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate XDG_CONFIG_HOME are marked with #[serial].

use appinfo_common::config::{
    load_toml_config, CompiledDefaults, ConfigOverrides, ServiceConfig, TomlConfig,
    DEFAULT_BIND_ADDR, DEFAULT_MISSING_PRINCIPAL_STATUS,
};
use appinfo_common::Error;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

fn compiled() -> CompiledDefaults {
    CompiledDefaults {
        version: "0.1.0".to_string(),
        build: "abcdef12".to_string(),
    }
}

#[test]
fn test_defaults_when_nothing_configured() {
    let config =
        ServiceConfig::resolve(ConfigOverrides::default(), TomlConfig::default(), compiled())
            .unwrap();

    assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    assert_eq!(config.version, "0.1.0");
    assert_eq!(config.build, "abcdef12");
    assert_eq!(config.missing_principal_status, DEFAULT_MISSING_PRINCIPAL_STATUS);
    assert!(config.claim.is_none());
    assert!(config.principal.is_none());
}

#[test]
fn test_overrides_beat_file_beats_defaults() {
    let file = TomlConfig {
        bind_addr: Some("0.0.0.0:9000".to_string()),
        version: Some("2.0.0".to_string()),
        build: Some("file-build".to_string()),
        missing_principal_status: Some(401),
        ..Default::default()
    };
    let overrides = ConfigOverrides {
        version: Some("3.0.0".to_string()),
        missing_principal_status: Some(403),
        ..Default::default()
    };

    let config = ServiceConfig::resolve(overrides, file, compiled()).unwrap();

    assert_eq!(config.version, "3.0.0");
    assert_eq!(config.missing_principal_status, 403);
    // Not overridden, so file value wins over compiled default
    assert_eq!(config.build, "file-build");
    assert_eq!(config.bind_addr.to_string(), "0.0.0.0:9000");
}

#[test]
fn test_success_status_rejected() {
    let overrides = ConfigOverrides {
        missing_principal_status: Some(200),
        ..Default::default()
    };

    let result = ServiceConfig::resolve(overrides, TomlConfig::default(), compiled());
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_invalid_bind_addr_rejected() {
    let overrides = ConfigOverrides {
        bind_addr: Some("not-an-address".to_string()),
        ..Default::default()
    };

    let result = ServiceConfig::resolve(overrides, TomlConfig::default(), compiled());
    assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("not-an-address")));
}

#[test]
fn test_empty_build_rejected() {
    let overrides = ConfigOverrides {
        build: Some(String::new()),
        ..Default::default()
    };

    let result = ServiceConfig::resolve(overrides, TomlConfig::default(), compiled());
    assert!(result.is_err());
}

#[test]
fn test_load_explicit_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
missing_principal_status = 401

[claim]
name = "appinfo"
url = "http://localhost:5780"
roles = ["admin", "user"]

[principal]
username = "dev"
email = "dev@example.org"
display_name = "Developer"
roles = ["user"]
authenticated = true
"#,
    )
    .unwrap();

    let file = load_toml_config(Some(&path)).unwrap();
    assert_eq!(file.missing_principal_status, Some(401));

    let claim = file.claim.as_ref().unwrap();
    assert_eq!(claim.roles, vec!["admin".to_string(), "user".to_string()]);

    let principal = file.principal.as_ref().unwrap();
    assert_eq!(principal.email, "dev@example.org");
    assert!(principal.authenticated);
}

#[test]
fn test_missing_explicit_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let result = load_toml_config(Some(&path));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_malformed_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "missing_principal_status = \"five hundred\"").unwrap();

    let result = load_toml_config(Some(&path));
    assert!(matches!(result, Err(Error::Toml(_))));
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_default_location_from_xdg_config_home() {
    let dir = TempDir::new().unwrap();
    let app_dir = dir.path().join("appinfo");
    fs::create_dir_all(&app_dir).unwrap();
    fs::write(app_dir.join("config.toml"), "build = \"from-xdg\"").unwrap();

    let previous = env::var("XDG_CONFIG_HOME").ok();
    env::set_var("XDG_CONFIG_HOME", dir.path());

    let file = load_toml_config(None);

    match previous {
        Some(value) => env::set_var("XDG_CONFIG_HOME", value),
        None => env::remove_var("XDG_CONFIG_HOME"),
    }

    assert_eq!(file.unwrap().build.as_deref(), Some("from-xdg"));
}
