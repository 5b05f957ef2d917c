//! Structured logging for neowatch.
//!
//! Console output with uptime timestamps and module paths, plus JSON file
//! logging in debug builds. The level comes from `RUST_LOG` when set,
//! otherwise from the config's `debug.log_level`.

use neowatch_config::Config;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config names a level.
pub const DEFAULT_FILTER: &str = "info,ureq=warn,rustls=warn";

/// Resolve the filter directive string from an optional config.
///
/// An empty `log_level` falls back to [`DEFAULT_FILTER`].
pub fn filter_directives(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.is_empty() => config.debug.log_level.clone(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file (debug builds only)
/// * `debug_build` - whether file logging is enabled
/// * `config` - optional configuration supplying the log level
///
/// ```no_run
/// use neowatch_log::init_logging;
///
/// init_logging(None, false, None);
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join("neowatch.log"))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// `EnvFilter` built from [`DEFAULT_FILTER`].
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_quiets_http_client() {
        let filter_str = format!("{}", default_env_filter());
        assert!(filter_str.contains("ureq=warn"));
        assert!(filter_str.contains("info"));
    }

    #[test]
    fn test_config_level_wins_over_default() {
        let mut config = Config::default();
        config.debug.log_level = "debug,neowatch_feed=trace".to_string();
        assert_eq!(filter_directives(Some(&config)), "debug,neowatch_feed=trace");
    }

    #[test]
    fn test_empty_config_level_falls_back() {
        let mut config = Config::default();
        config.debug.log_level.clear();
        assert_eq!(filter_directives(Some(&config)), DEFAULT_FILTER);
        assert_eq!(filter_directives(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_env_filter_parsing() {
        let valid_filters = [
            "info",
            "debug,neowatch_scene=trace",
            "warn,neowatch_feed=debug",
            "error",
        ];

        for filter_str in &valid_filters {
            let result = EnvFilter::try_from(*filter_str);
            assert!(result.is_ok(), "Failed to parse filter: {}", filter_str);
        }
    }
}
