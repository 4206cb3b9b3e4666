use std::env;
use std::path::PathBuf;

use pave_core::file_io::DEFAULT_SETTINGS_FILE;
use thiserror::Error;

/// Top-level configuration for the CLI, read from `.env` and the
/// environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub telemetry: TelemetryConfig,
    /// Settings file used when `--settings` is not given
    pub settings_path: PathBuf,
    /// Monte Carlo sample size overriding the settings file
    pub default_samples: Option<usize>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let log_level = env::var("PAVE_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        let settings_path = env::var("PAVE_SETTINGS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SETTINGS_FILE));

        let default_samples = match env::var("PAVE_SAMPLES") {
            Ok(value) => Some(
                value
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| ConfigError::InvalidSamples { value })?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            telemetry: TelemetryConfig { log_level },
            settings_path,
            default_samples,
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PAVE_SAMPLES must be a non-negative integer, got '{value}'")]
    InvalidSamples { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("PAVE_LOG_LEVEL");
        env::remove_var("PAVE_SETTINGS");
        env::remove_var("PAVE_SAMPLES");
    }

    #[test]
    fn test_load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.telemetry.log_level, "warn");
        assert_eq!(config.settings_path, PathBuf::from("pave-settings.json"));
        assert_eq!(config.default_samples, None);
    }

    #[test]
    fn test_reads_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PAVE_LOG_LEVEL", "debug");
        env::set_var("PAVE_SETTINGS", "/tmp/pave.json");
        env::set_var("PAVE_SAMPLES", "5000");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.telemetry.log_level, "debug");
        assert_eq!(config.settings_path, PathBuf::from("/tmp/pave.json"));
        assert_eq!(config.default_samples, Some(5000));
        reset_env();
    }

    #[test]
    fn test_rejects_bad_sample_count() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PAVE_SAMPLES", "lots");
        let err = AppConfig::load().unwrap_err();
        assert!(err.to_string().contains("lots"));
        reset_env();
    }
}
