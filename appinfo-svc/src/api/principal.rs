//! Principal middleware
//!
//! Credential verification happens upstream; these layers only inject a
//! configured development principal and enforce the application claim on
//! principals that are already present.

use appinfo_common::User;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::AppState;

/// Insert the fixed principal into requests that do not already carry one
///
/// No-op unless a principal is configured.
pub async fn inject_fixed_principal(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(principal) = state.principal.as_deref() {
        if request.extensions().get::<User>().is_none() {
            debug!("injecting fixed principal '{}'", principal.username);
            request.extensions_mut().insert(principal.clone());
        }
    }

    next.run(request).await
}

/// Reject principals lacking every role required by the application claim
///
/// Requests without a principal pass through; the handler reports them.
pub async fn require_claim(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let (Some(claim), Some(user)) = (state.claim.as_deref(), request.extensions().get::<User>())
    {
        if !claim.is_satisfied_by(user) {
            warn!(
                "user '{}' with roles {:?} does not satisfy claim for '{}'",
                user.username, user.roles, claim.name
            );
            return Err(ApiError::Forbidden {
                username: user.username.clone(),
                application: claim.name.clone(),
            });
        }
    }

    Ok(next.run(request).await)
}
