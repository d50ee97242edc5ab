//! Application settings and configuration management

use crate::error::{AppError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Model artifact configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Path to the GGUF model artifact
    #[serde(default = "default_model_path")]
    pub path: String,
    /// Weight quantization type, matching the artifact (e.g. "q4_0")
    #[serde(default = "default_weight_type")]
    pub weight_type: String,
}

fn default_model_path() -> String {
    "sd-turbo-Q4_0.gguf".to_string()
}

fn default_weight_type() -> String {
    "q4_0".to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            weight_type: default_weight_type(),
        }
    }
}

/// Fixed sampling operating point. Turbo models are tuned for very few steps
/// at low guidance, and the resolution matches what the model was trained at;
/// clients cannot override these.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SamplingConfig {
    #[serde(default = "default_dimension")]
    pub width: u32,
    #[serde(default = "default_dimension")]
    pub height: u32,
    #[serde(default = "default_steps")]
    pub steps: u32,
    #[serde(default = "default_cfg_scale")]
    pub cfg_scale: f32,
}

fn default_dimension() -> u32 {
    512
}

fn default_steps() -> u32 {
    1
}

fn default_cfg_scale() -> f32 {
    1.0
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            width: default_dimension(),
            height: default_dimension(),
            steps: default_steps(),
            cfg_scale: default_cfg_scale(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Settings {
    /// Load settings from configuration files and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/default.toml")
    }

    /// Load settings from a specific configuration file path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("model.path", "sd-turbo-Q4_0.gguf")?
            .set_default("model.weight_type", "q4_0")?
            .set_default("sampling.width", 512)?
            .set_default("sampling.height", 512)?
            .set_default("sampling.steps", 1)?
            .set_default("sampling.cfg_scale", 1.0)?
            // Load from configuration file
            .add_source(
                File::with_name(path.as_ref().to_str().unwrap_or("config/default"))
                    .required(false),
            )
            // Override with environment variables (prefixed with SD_GATEWAY__)
            .add_source(
                Environment::with_prefix("SD_GATEWAY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = config.try_deserialize()?;

        // Legacy environment variables from the original deployment take
        // precedence over everything else.
        if let Ok(path) = std::env::var("SD_MODEL_PATH") {
            if !path.is_empty() {
                settings.model.path = path;
            }
        }
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                settings.server.port = port;
            }
        }

        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "Server port cannot be 0".to_string(),
            )));
        }

        if self.model.path.is_empty() {
            return Err(AppError::Config(config::ConfigError::Message(
                "Model path cannot be empty".to_string(),
            )));
        }

        // Latent-space models require dimensions divisible by 8.
        for (name, dim) in [("width", self.sampling.width), ("height", self.sampling.height)] {
            if dim == 0 || dim % 8 != 0 {
                return Err(AppError::Config(config::ConfigError::Message(format!(
                    "Sampling {} must be a non-zero multiple of 8, got {}",
                    name, dim
                ))));
            }
        }

        if self.sampling.steps == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "Sampling steps must be at least 1".to_string(),
            )));
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            model: ModelConfig::default(),
            sampling: SamplingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.model.path, "sd-turbo-Q4_0.gguf");
        assert_eq!(settings.model.weight_type, "q4_0");
        assert_eq!(settings.sampling.width, 512);
        assert_eq!(settings.sampling.height, 512);
        assert_eq!(settings.sampling.steps, 1);
        assert_eq!(settings.sampling.cfg_scale, 1.0);
    }

    #[test]
    fn test_validate_rejects_bad_dimensions() {
        let mut settings = Settings::default();
        settings.sampling.width = 500;
        assert!(settings.validate().is_err());

        settings.sampling.width = 512;
        settings.sampling.height = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_steps() {
        let mut settings = Settings::default();
        settings.sampling.steps = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(Settings::default().validate().is_ok());
    }
}
