//! Core application functionality
//!
//! This module contains the application logic around the glyph pipeline:
//! - CLI handling and validation
//! - Settings from defaults, the user config file and flags
//! - Per-weight builds and the top-level runner

pub mod build;
pub mod cli;
pub mod config;
pub mod platform;
pub mod runner;

// Re-export commonly used items
pub use build::{FontProject, WeightReport};
pub use cli::CliArgs;
pub use config::{BuildSettings, ConfigFile};
pub use runner::run_app;
