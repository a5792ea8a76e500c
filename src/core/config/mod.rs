//! Build configuration
//!
//! Settings come from three layers, each overriding the previous one:
//! built-in defaults, the user settings file and command line flags.

pub mod settings;
pub mod user_config;

// Simple, clear re-exports
pub use settings::{BuildSettings, WeightSetting, DEFAULT_STROKE_WIDTH};
pub use user_config::ConfigFile;
