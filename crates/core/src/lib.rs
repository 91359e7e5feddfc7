//! ndkenv Core - configuration and shared error types

pub mod config;
pub mod error;

pub use config::{AndroidConfig, AppConfig};
pub use error::{NdkEnvError, Result};

/// ndkenv version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "ndkenv";
