//! # Core Module
//!
//! Process configuration and log setup for the reminder job.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Config built from the environment, file-backed log output

pub mod config;
pub mod logging;

// Re-export commonly used items
pub use config::{Config, SmtpConfig};
pub use logging::CRITICAL_TARGET;
