//! Shared HTTP API types
//!
//! This module contains ONLY plain data types with no HTTP framework
//! dependencies. The service wraps them with axum-specific responses.

pub mod problem;

pub use problem::ProblemDetail;
