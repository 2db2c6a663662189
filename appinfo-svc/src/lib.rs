//! appinfo-svc library - application metadata service
//!
//! Serves `GET /appinfo`, which reports the running version and echoes the
//! authenticated principal placed on the request by an upstream
//! authentication layer.

use std::sync::Arc;

use appinfo_common::config::{ServiceConfig, DEFAULT_MISSING_PRINCIPAL_STATUS};
use appinfo_common::{Claim, User};
use axum::http::StatusCode;
use axum::Router;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod version;

pub use error::ApiError;
pub use version::VersionInfo;

/// Application state shared across HTTP handlers
///
/// Immutable after startup; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Static version and build identifiers
    pub version: VersionInfo,
    /// Status returned when a request carries no principal
    pub missing_principal_status: StatusCode,
    /// Role requirement for protected routes
    pub claim: Option<Arc<Claim>>,
    /// Fixed principal injected into requests lacking one (development only)
    pub principal: Option<Arc<User>>,
}

impl AppState {
    /// Create state with default error status, no claim and no fixed principal
    pub fn new(version: VersionInfo) -> Self {
        Self {
            version,
            missing_principal_status: StatusCode::from_u16(DEFAULT_MISSING_PRINCIPAL_STATUS)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            claim: None,
            principal: None,
        }
    }

    /// Build state from resolved configuration
    pub fn from_config(config: &ServiceConfig) -> appinfo_common::Result<Self> {
        let status = StatusCode::from_u16(config.missing_principal_status).map_err(|e| {
            appinfo_common::Error::Config(format!(
                "Invalid missing_principal_status {}: {}",
                config.missing_principal_status, e
            ))
        })?;

        let mut state = Self::new(VersionInfo::new(
            config.version.as_str(),
            config.build.as_str(),
        ))
        .with_missing_principal_status(status);
        state.claim = config.claim.clone().map(Arc::new);
        state.principal = config.principal.clone().map(Arc::new);
        Ok(state)
    }

    pub fn with_missing_principal_status(mut self, status: StatusCode) -> Self {
        self.missing_principal_status = status;
        self
    }

    pub fn with_claim(mut self, claim: Claim) -> Self {
        self.claim = Some(Arc::new(claim));
        self
    }

    pub fn with_principal(mut self, principal: User) -> Self {
        self.principal = Some(Arc::new(principal));
        self
    }
}

/// Build application router
///
/// `/appinfo` sits behind the claim check; `/health` is public.
/// The fixed-principal middleware wraps everything so the claim check
/// sees the injected user.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::get;

    let protected = Router::new()
        .route("/appinfo", get(api::get_app_info))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::require_claim,
        ));

    Router::new()
        .merge(protected)
        .merge(api::health_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::inject_fixed_principal,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
