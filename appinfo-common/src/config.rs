//! Configuration loading and resolution
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Levels 1 and 2 are both collected by the binary's argument parser and
//! arrive here as [`ConfigOverrides`].

use crate::security::{Claim, User};
use crate::{Error, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5780";

/// Status returned when no principal is attached to a request
pub const DEFAULT_MISSING_PRINCIPAL_STATUS: u16 = 500;

/// Contents of the TOML configuration file
///
/// Every key is optional. Unknown keys are ignored.
///
/// ```toml
/// bind_addr = "0.0.0.0:5780"
/// missing_principal_status = 401
///
/// [claim]
/// name = "appinfo"
/// url = "https://example.org/appinfo"
/// roles = ["user"]
///
/// [principal]
/// username = "dev"
/// email = "dev@example.org"
/// display_name = "Developer"
/// roles = ["user"]
/// authenticated = true
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub bind_addr: Option<String>,
    pub version: Option<String>,
    pub build: Option<String>,
    pub missing_principal_status: Option<u16>,
    /// Role requirement enforced on protected routes
    pub claim: Option<Claim>,
    /// Fixed principal injected into every request (development only)
    pub principal: Option<User>,
}

/// Settings supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind_addr: Option<String>,
    pub version: Option<String>,
    pub build: Option<String>,
    pub missing_principal_status: Option<u16>,
}

/// Values baked into the binary at compile time
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub version: String,
    pub build: String,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub version: String,
    pub build: String,
    pub missing_principal_status: u16,
    pub claim: Option<Claim>,
    pub principal: Option<User>,
}

impl ServiceConfig {
    /// Merge overrides, file settings and compiled defaults, then validate
    pub fn resolve(
        overrides: ConfigOverrides,
        file: TomlConfig,
        defaults: CompiledDefaults,
    ) -> Result<Self> {
        let bind_addr = overrides
            .bind_addr
            .or(file.bind_addr)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| Error::Config(format!("Invalid bind address '{}': {}", bind_addr, e)))?;

        let missing_principal_status = overrides
            .missing_principal_status
            .or(file.missing_principal_status)
            .unwrap_or(DEFAULT_MISSING_PRINCIPAL_STATUS);
        if !(400..=599).contains(&missing_principal_status) {
            return Err(Error::Config(format!(
                "missing_principal_status must be a 4xx or 5xx code, got {}",
                missing_principal_status
            )));
        }

        let version = overrides.version.or(file.version).unwrap_or(defaults.version);
        let build = overrides.build.or(file.build).unwrap_or(defaults.build);
        if version.is_empty() || build.is_empty() {
            return Err(Error::Config("version and build must not be empty".to_string()));
        }

        Ok(Self {
            bind_addr,
            version,
            build,
            missing_principal_status,
            claim: file.claim,
            principal: file.principal,
        })
    }
}

/// Locate the default configuration file for the platform
///
/// Linux checks `~/.config/appinfo/config.toml` then
/// `/etc/appinfo/config.toml`; other platforms use the user config directory.
pub fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("appinfo").join("config.toml"));
    if let Some(path) = user_config.filter(|p| p.exists()) {
        return Some(path);
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/appinfo/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Load the TOML configuration file
///
/// An explicitly requested file must exist. Without an explicit path the
/// platform default is tried; if none exists, defaults are used.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) => path,
            None => {
                warn!("No config file found, using defaults");
                return Ok(TomlConfig::default());
            }
        },
    };

    debug!("Loading config file {}", path.display());
    let content = std::fs::read_to_string(&path)?;
    Ok(toml::from_str(&content)?)
}
