//! HTTP API handlers for appinfo-svc

pub mod appinfo;
pub mod health;
pub mod principal;

pub use appinfo::{get_app_info, Meta, UserInfo};
pub use health::health_routes;
pub use principal::{inject_fixed_principal, require_claim};
