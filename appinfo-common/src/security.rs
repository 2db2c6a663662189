//! Security principal and authorization claim types
//!
//! A `User` is produced by whatever authentication layer sits in front of the
//! service. This crate never verifies credentials; it only carries the result.

use serde::{Deserialize, Serialize};

/// Authenticated principal for the current request
///
/// Immutable once constructed by the authentication layer. In the TOML
/// configuration (fixed principal) the keys are snake_case; missing keys fall
/// back to empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub username: String,
    /// Ordered as issued by the authentication layer
    pub roles: Vec<String>,
    pub email: String,
    pub user_id: String,
    pub display_name: String,
    pub authenticated: bool,
}

impl User {
    /// True if the user carries at least one of `roles`
    pub fn has_any_role(&self, roles: &[String]) -> bool {
        roles.iter().any(|required| self.roles.contains(required))
    }
}

/// Authorization requirement of an application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Claim {
    /// Name of the application
    pub name: String,
    /// URL of the application
    pub url: String,
    /// Any one of these roles grants access
    pub roles: Vec<String>,
}

impl Claim {
    /// Check whether `user` satisfies this claim
    ///
    /// A claim without roles is satisfied by every user.
    ///
    /// # Examples
    ///
    /// ```
    /// use appinfo_common::{Claim, User};
    ///
    /// let claim = Claim {
    ///     name: "appinfo".to_string(),
    ///     url: "http://localhost:5780".to_string(),
    ///     roles: vec!["admin".to_string()],
    /// };
    /// let user = User { roles: vec!["admin".to_string()], ..Default::default() };
    /// assert!(claim.is_satisfied_by(&user));
    /// ```
    pub fn is_satisfied_by(&self, user: &User) -> bool {
        self.roles.is_empty() || user.has_any_role(&self.roles)
    }
}
