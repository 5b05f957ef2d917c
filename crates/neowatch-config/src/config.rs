//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Near-earth-object feed settings.
    pub feed: FeedConfig,
    /// Asteroid scene population settings.
    pub scene: SceneConfig,
    /// Viewport settings.
    pub window: WindowConfig,
    /// Camera settings.
    pub camera: CameraConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Feed endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    /// Scheme and host of the feed API, without a trailing slash.
    pub base_url: String,
    /// API key appended to every request.
    pub api_key: String,
    /// Date (`YYYY-MM-DD`) fetched once at startup. Empty disables the startup fetch.
    pub default_date: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u32,
}

/// How an asteroid's render radius is derived from its estimated diameter.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum RadiusPolicy {
    /// Three discrete radii, one per size class.
    #[default]
    Tiered,
    /// `max(0.3, 0.3 * d)`, growing linearly once `d` exceeds 1.
    Continuous,
}

/// How the displayed diameter is computed from the feet bounds.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum DiameterPolicy {
    /// Mean of the minimum and maximum estimate.
    #[default]
    MinMaxMean,
    /// Maximum estimate added to itself and halved, as older releases did.
    DuplicatedMax,
}

/// Asteroid scene population configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Distance from the origin at which asteroids are placed.
    pub orbital_shell_radius: f32,
    /// Radius derivation for asteroid meshes.
    pub radius_policy: RadiusPolicy,
    /// Diameter derivation for the summary panel.
    pub diameter_policy: DiameterPolicy,
    /// Placement RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

/// Viewport configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
}

/// Camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Distance of the camera from the origin along +Z.
    pub distance: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.nasa.gov".to_string(),
            api_key: "DEMO_KEY".to_string(),
            default_date: String::new(),
            timeout_seconds: 30,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            orbital_shell_radius: 14.0,
            radius_policy: RadiusPolicy::Tiered,
            diameter_policy: DiameterPolicy::MinMaxMean,
            seed: None,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            distance: 40.0,
            near: 0.01,
            far: 1000.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Reject values that would produce a degenerate scene.
    ///
    /// Run again after [`apply_cli_overrides`](Self::apply_cli_overrides).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let radius = self.scene.orbital_shell_radius;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "scene.orbital_shell_radius",
                reason: format!("must be a positive finite number, got {radius}"),
            });
        }
        let distance = self.camera.distance;
        if !distance.is_finite() || distance <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "camera.distance",
                reason: format!("must be a positive finite number, got {distance}"),
            });
        }
        Ok(())
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        new_config.validate()?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
