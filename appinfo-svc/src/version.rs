//! Version and build identification
//!
//! `version` and `build` are fixed at startup and never depend on request
//! content.

use std::sync::Arc;

/// Package version compiled into the binary
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Short git hash captured by build.rs ("unknown" outside a git checkout)
pub const GIT_HASH: &str = env!("GIT_HASH");
/// RFC 3339 build timestamp captured by build.rs
pub const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP");
/// Cargo profile used for the build
pub const BUILD_PROFILE: &str = env!("BUILD_PROFILE");

/// Static version metadata shared by all requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    version: Arc<str>,
    build: Arc<str>,
}

impl VersionInfo {
    pub fn new(version: impl Into<Arc<str>>, build: impl Into<Arc<str>>) -> Self {
        Self {
            version: version.into(),
            build: build.into(),
        }
    }

    /// Version info baked into this binary
    pub fn compiled() -> Self {
        Self::new(PKG_VERSION, GIT_HASH)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn build(&self) -> &str {
        &self.build
    }

    /// `"<version>-<build>"`
    pub fn display_version(&self) -> String {
        format!("{}-{}", self.version, self.build)
    }
}
