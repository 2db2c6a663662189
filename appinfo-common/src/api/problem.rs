//! Problem-detail error documents (RFC 7807)
//!
//! Every error response produced by the service carries one of these as its
//! JSON body, with the HTTP status duplicated in the `status` field.

use serde::{Deserialize, Serialize};

/// Media type for problem-detail bodies
pub const PROBLEM_JSON: &str = "application/problem+json";

/// Default `type` URI when no more specific problem type applies
pub const ABOUT_BLANK: &str = "about:blank";

/// Structured error response body
///
/// # Examples
///
/// ```
/// use appinfo_common::api::ProblemDetail;
///
/// let problem = ProblemDetail::new(500, "Internal Server Error", "no principal");
/// assert_eq!(problem.status, 500);
/// assert_eq!(problem.problem_type, "about:blank");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetail {
    /// URI reference identifying the problem type
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short summary of the problem type
    pub title: String,
    /// HTTP status code of this occurrence
    pub status: u16,
    /// Explanation specific to this occurrence
    pub detail: String,
}

impl ProblemDetail {
    /// Create a problem detail with the `about:blank` type
    pub fn new(status: u16, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            problem_type: ABOUT_BLANK.to_string(),
            title: title.into(),
            status,
            detail: detail.into(),
        }
    }
}
