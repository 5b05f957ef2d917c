//! Configuration system for neowatch.
//!
//! Provides runtime-configurable settings that persist to disk as RON files,
//! with CLI overrides via clap and hot-reload detection. The scene policy
//! enums live here so every crate agrees on their serialized names.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebugConfig, DiameterPolicy, FeedConfig, RadiusPolicy, SceneConfig,
    WindowConfig,
};
pub use error::ConfigError;
