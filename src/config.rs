use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::PROXIMITY_THRESHOLD_KM;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    #[serde(default = "default_proximity_threshold_km")]
    pub proximity_threshold_km: f64,
    /// Upper bound on families per request; the graph build is O(n²)
    #[serde(default = "default_max_families")]
    pub max_families: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            proximity_threshold_km: default_proximity_threshold_km(),
            max_families: default_max_families(),
        }
    }
}

fn default_proximity_threshold_km() -> f64 { PROXIMITY_THRESHOLD_KM }
fn default_max_families() -> usize { 5000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with EVAC_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., EVAC__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Reject values the server cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.engine.proximity_threshold_km;
        if !(threshold.is_finite() && threshold >= 0.0) {
            return Err(ConfigError::Message(format!(
                "engine.proximity_threshold_km must be a non-negative number, got {}",
                threshold
            )));
        }
        if self.server.workers == Some(0) {
            return Err(ConfigError::Message("server.workers must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("EVAC")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_engine() {
        let engine = EngineSettings::default();
        assert_eq!(engine.proximity_threshold_km, 2.0);
        assert_eq!(engine.max_families, 5000);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_load_shipped_default_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/default.toml");
        let settings = Settings::load_from(path).unwrap();
        assert_eq!(settings.engine.max_families, 5000);
        assert_eq!(settings.server.workers, Some(4));
    }

    fn settings_from_toml(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(settings_from_toml("").validate().is_ok());
        assert!(settings_from_toml("[server]\nworkers = 2\n").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let settings = settings_from_toml("[server]\nworkers = 0\n");
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_threshold() {
        let settings = settings_from_toml("[engine]\nproximity_threshold_km = -1.0\n");
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                "[engine]\nproximity_threshold_km = 1.5\n\n[server]\nport = 9000\n",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.engine.proximity_threshold_km, 1.5);
        assert_eq!(settings.engine.max_families, 5000);
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.logging.format, "json");
    }
}
