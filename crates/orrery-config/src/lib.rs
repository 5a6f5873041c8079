//! Configuration system for the orrery viewer.
//!
//! Runtime-configurable settings persisted as RON, with CLI overrides via
//! clap and range validation for everything the scene consumes.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, SceneConfig, WindowConfig, default_config_dir};
pub use error::ConfigError;
