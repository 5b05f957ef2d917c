//! Command-line argument parsing for neowatch.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, DiameterPolicy, RadiusPolicy};

/// neowatch command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "neowatch", about = "Near-earth asteroid viewer")]
pub struct CliArgs {
    /// Date to fetch at startup (YYYY-MM-DD).
    #[arg(long)]
    pub date: Option<String>,

    /// Feed API key.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Feed base URL.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Placement RNG seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Orbital shell radius for asteroid placement.
    #[arg(long)]
    pub shell_radius: Option<f32>,

    /// Asteroid radius derivation.
    #[arg(long, value_enum)]
    pub radius_policy: Option<RadiusPolicy>,

    /// Displayed diameter derivation.
    #[arg(long, value_enum)]
    pub diameter_policy: Option<DiameterPolicy>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run this many frames without reading stdin, then exit.
    #[arg(long)]
    pub frames: Option<u64>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref date) = args.date {
            self.feed.default_date = date.clone();
        }
        if let Some(ref key) = args.api_key {
            self.feed.api_key = key.clone();
        }
        if let Some(ref url) = args.base_url {
            self.feed.base_url = url.clone();
        }
        if let Some(seed) = args.seed {
            self.scene.seed = Some(seed);
        }
        if let Some(radius) = args.shell_radius {
            self.scene.orbital_shell_radius = radius;
        }
        if let Some(policy) = args.radius_policy {
            self.scene.radius_policy = policy;
        }
        if let Some(policy) = args.diameter_policy {
            self.scene.diameter_policy = policy;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            date: Some("2021-06-01".to_string()),
            seed: Some(99),
            radius_policy: Some(RadiusPolicy::Continuous),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.feed.default_date, "2021-06-01");
        assert_eq!(config.scene.seed, Some(99));
        assert_eq!(config.scene.radius_policy, RadiusPolicy::Continuous);
        // Non-overridden fields retain defaults
        assert_eq!(config.feed.api_key, "DEMO_KEY");
        assert_eq!(config.scene.orbital_shell_radius, 14.0);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_policy_names() {
        let args = CliArgs::parse_from([
            "neowatch",
            "--diameter-policy",
            "duplicated-max",
            "--shell-radius",
            "12",
        ]);
        assert_eq!(args.diameter_policy, Some(DiameterPolicy::DuplicatedMax));
        assert_eq!(args.shell_radius, Some(12.0));
    }

    #[test]
    fn test_overridden_shell_radius_is_validated() {
        let args = CliArgs::parse_from(["neowatch", "--shell-radius", "0"]);
        let mut config = Config::default();
        config.apply_cli_overrides(&args);
        assert!(config.validate().is_err());
    }
}
