//! # appinfo common library
//!
//! Shared code for the appinfo service:
//! - Security principal types (`User`, `Claim`)
//! - Problem-detail error documents
//! - Configuration loading and resolution

pub mod api;
pub mod config;
pub mod error;
pub mod security;

pub use error::{Error, Result};
pub use security::{Claim, User};
