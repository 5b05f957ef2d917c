use neowatch_config::ConfigError;

use crate::platform::PlatformError;

/// Startup failures. Everything after startup is reported to the user and
/// the viewer keeps running.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("failed to start console thread: {0}")]
    Console(#[source] std::io::Error),
}
