//! OS directory resolution for the viewer's config and log files.

use std::io;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "neowatch";

/// Config file name inside [`PlatformDirs::config_dir`].
pub const CONFIG_FILE: &str = "config.ron";

/// Errors that can occur while resolving or creating directories.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

/// OS-specific directories for the viewer.
///
/// Follows OS conventions via `dirs` (XDG on Linux, Known Folders on
/// Windows, Library on macOS).
#[derive(Debug, Clone)]
pub struct PlatformDirs {
    pub config_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolve directories without creating them.
    pub fn resolve() -> Result<Self, PlatformError> {
        let base = dirs::config_dir().ok_or(PlatformError::NoConfigDir)?;
        Ok(Self::under(&base))
    }

    /// Resolve directories rooted under `root` instead of the OS location.
    pub fn resolve_with_root(root: &Path) -> Self {
        Self::under(root)
    }

    fn under(base: &Path) -> Self {
        let app_dir = base.join(APP_NAME);
        Self {
            config_dir: app_dir.join("config"),
            log_dir: app_dir.join("logs"),
        }
    }

    /// Create both directories on disk.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_root_layout() {
        let root = Path::new("some-root");
        let dirs = PlatformDirs::resolve_with_root(root);
        assert_eq!(dirs.config_dir, root.join("neowatch").join("config"));
        assert_eq!(dirs.log_dir, root.join("neowatch").join("logs"));
        assert_eq!(
            dirs.config_file(),
            root.join("neowatch").join("config").join("config.ron")
        );
    }

    #[test]
    fn test_resolve_is_absolute() {
        // Some CI containers have no home directory; only check when resolvable.
        if let Ok(dirs) = PlatformDirs::resolve() {
            assert!(dirs.config_dir.is_absolute());
            assert!(dirs.log_dir.is_absolute());
        }
    }

    #[test]
    fn test_directory_creation() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::resolve_with_root(tmp.path());
        dirs.create_dirs().unwrap();
        assert!(dirs.config_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
        // Idempotent.
        dirs.create_dirs().unwrap();
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            PlatformError::NoConfigDir.to_string(),
            "could not determine OS configuration directory"
        );
        let io = PlatformError::from(io::Error::other("disk full"));
        assert_eq!(io.to_string(), "platform I/O error: disk full");
    }
}
