use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use validator::Validate;

use crate::core::ScalingMode;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerSettings,
    #[serde(default)]
    #[validate(nested)]
    pub models: ModelSettings,
    #[serde(default)]
    pub preprocessing: PreprocessingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    #[validate(length(min = 1))]
    pub host: String,
    #[serde(default = "default_port")]
    #[validate(range(min = 1))]
    pub port: u16,
    #[validate(range(min = 1, max = 256))]
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

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 5001 }

/// Locations of the exported classifier artifacts, one per tier
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ModelSettings {
    #[serde(default = "default_simple_path")]
    #[validate(length(min = 1))]
    pub simple_path: String,
    #[serde(default = "default_enhanced_path")]
    #[validate(length(min = 1))]
    pub enhanced_path: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            simple_path: default_simple_path(),
            enhanced_path: default_enhanced_path(),
        }
    }
}

fn default_simple_path() -> String { "models/best_logistic_reg_simple_smote.json".to_string() }
fn default_enhanced_path() -> String { "models/best_logistic_reg_enhanced_smote.json".to_string() }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreprocessingSettings {
    #[serde(default)]
    pub scaling: ScalingMode,
}

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
fn default_log_format() -> String { "pretty".to_string() }

/// Errors raised while building [`Settings`]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PCOS__)
    pub fn load() -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PCOS__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        Self::finish(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        Self::finish(settings)
    }

    fn finish(config: Config) -> Result<Self, SettingsError> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("PCOS")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
