//! Error types for appinfo-svc
//!
//! Every request error renders as a problem-detail document whose `status`
//! field matches the HTTP status of the response.

use appinfo_common::api::problem::{ProblemDetail, PROBLEM_JSON};
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Request-level error returned by handlers and middleware
#[derive(Error, Debug)]
pub enum ApiError {
    /// No principal was attached to the request by the authentication layer
    ///
    /// The status is configurable; it defaults to 500.
    #[error("no authenticated principal available for this request")]
    MissingPrincipal { status: StatusCode },

    /// Principal does not carry any role required by the application claim
    #[error("user '{username}' is not authorized for '{application}'")]
    Forbidden {
        username: String,
        application: String,
    },
}

impl ApiError {
    /// HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingPrincipal { status } => *status,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let problem = ProblemDetail::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or("Error"),
            self.to_string(),
        );

        let mut response = (status, Json(problem)).into_response();
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON));
        response
    }
}
