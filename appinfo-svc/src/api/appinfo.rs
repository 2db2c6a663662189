//! Application metadata endpoint
//!
//! Reports the running version together with the identity of the
//! authenticated principal.

use appinfo_common::User;
use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::AppState;

/// Information about the currently logged-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub email: String,
    pub display_name: String,
    /// Always serialized, `[]` when the user has no roles
    pub roles: Vec<String>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            roles: user.roles.clone(),
        }
    }
}

/// Application metadata response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// `"<version>-<build>"`
    pub version: String,
    #[serde(flatten)]
    pub user_info: UserInfo,
}

/// Produce metadata for the request's principal
///
/// Fails with the configured status when no principal is present.
pub fn handle(state: &AppState, user: Option<&User>) -> Result<Meta, ApiError> {
    let user = user.ok_or_else(|| {
        warn!("appinfo requested without an authenticated principal");
        ApiError::MissingPrincipal {
            status: state.missing_principal_status,
        }
    })?;

    Ok(Meta {
        version: state.version.display_version(),
        user_info: UserInfo::from(user),
    })
}

/// GET /appinfo
pub async fn get_app_info(
    State(state): State<AppState>,
    user: Option<Extension<User>>,
) -> Result<Json<Meta>, ApiError> {
    debug!("return the application metadata info");
    handle(&state, user.as_deref()).map(Json)
}
