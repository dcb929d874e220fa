//! Configuration management for the itinerary service
//!
//! Handles loading configuration from an optional TOML file and environment
//! variables, and validates the result before the server starts.

use crate::ItineraryError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "ITINERARY_CONFIG";

/// Root configuration structure for the itinerary service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItineraryConfig {
    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Generation provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Which generation provider backs the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Anthropic Claude Messages API
    #[default]
    Anthropic,
    /// Google generative language API
    Google,
}

impl ProviderKind {
    /// Environment variable holding the provider credential
    #[must_use]
    pub fn api_key_env(self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::Google => "GOOGLE_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Anthropic => write!(f, "anthropic"),
            ProviderKind::Google => write!(f, "google"),
        }
    }
}

/// Generation provider settings.
///
/// Unset optional values fall back to the selected provider's defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider selection
    #[serde(default)]
    pub kind: ProviderKind,
    /// Model identifier
    pub model: Option<String>,
    /// Maximum number of output tokens
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// API base URL
    pub base_url: Option<String>,
    /// Overall request timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_provider_timeout() -> u32 {
    120
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl ServerConfig {
    /// Address the listener binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            model: None,
            max_tokens: None,
            temperature: None,
            base_url: None,
            timeout_seconds: default_provider_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ItineraryConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::load_from_path(path)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let required = config_path.is_some();
        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));

        if required || config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(required)
                    .format(config::FileFormat::Toml),
            );
        }

        // ITINERARY__PROVIDER__KIND=google and friends
        builder = builder.add_source(
            Environment::with_prefix("ITINERARY")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| format!("Failed to build configuration from {}", config_file.display()))?;

        let mut config: ItineraryConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.provider.timeout_seconds == 0 {
            self.provider.timeout_seconds = default_provider_timeout();
        }
        if self.provider.model.as_deref().is_some_and(str::is_empty) {
            self.provider.model = None;
        }
        if self.provider.base_url.as_deref().is_some_and(str::is_empty) {
            self.provider.base_url = None;
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ItineraryError::config("Server port cannot be 0").into());
        }

        if self.provider.timeout_seconds > 600 {
            return Err(
                ItineraryError::config("Provider timeout cannot exceed 600 seconds").into(),
            );
        }

        if let Some(max_tokens) = self.provider.max_tokens {
            if max_tokens == 0 || max_tokens > 100_000 {
                return Err(ItineraryError::config(
                    "Provider max tokens must be between 1 and 100000",
                )
                .into());
            }
        }

        if let Some(temperature) = self.provider.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ItineraryError::config(format!(
                    "Provider temperature must be between 0.0 and 2.0, got: {temperature}"
                ))
                .into());
            }
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ItineraryError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ItineraryError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if let Some(base_url) = &self.provider.base_url {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(ItineraryError::config(
                    "Provider base URL must be a valid HTTP or HTTPS URL",
                )
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ItineraryConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.provider.kind, ProviderKind::Anthropic);
        assert_eq!(config.provider.timeout_seconds, 120);
        assert_eq!(config.logging.level, "info");
        assert!(config.provider.model.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bind_address() {
        let config = ItineraryConfig::default();
        assert_eq!(config.server.bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_api_key_env_per_provider() {
        assert_eq!(ProviderKind::Anthropic.api_key_env(), "ANTHROPIC_API_KEY");
        assert_eq!(ProviderKind::Google.api_key_env(), "GOOGLE_API_KEY");
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = ItineraryConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = ItineraryConfig::default();
        config.provider.timeout_seconds = 900;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_temperature() {
        let mut config = ItineraryConfig::default();
        config.provider.temperature = Some(3.5);
        assert!(config.validate().is_err());

        config.provider.temperature = Some(0.7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_base_url() {
        let mut config = ItineraryConfig::default();
        config.provider.base_url = Some("ftp://example.com".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_clears_empty_values() {
        let mut config = ItineraryConfig::default();
        config.server.host = String::new();
        config.provider.model = Some(String::new());
        config.provider.timeout_seconds = 0;
        config.apply_defaults();
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.provider.model.is_none());
        assert_eq!(config.provider.timeout_seconds, 120);
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!(
            "itinerary-config-test-{}.toml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nport = 9090\n\n[provider]\nkind = \"google\"\nmodel = \"gemini-1.5-pro\"\ntemperature = 0.4\n"
        )
        .unwrap();

        let config = ItineraryConfig::load_from_path(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.provider.kind, ProviderKind::Google);
        assert_eq!(config.provider.model.as_deref(), Some("gemini-1.5-pro"));
        assert_eq!(config.provider.temperature, Some(0.4));
    }

    #[test]
    fn test_environment_variable_override() {
        // SAFETY: Test environment, setting test values only
        unsafe {
            env::set_var("ITINERARY__PROVIDER__KIND", "google");
            env::set_var("ITINERARY__LOGGING__FORMAT", "json");
        }

        let result = ItineraryConfig::load_from_path(None);

        // SAFETY: Test cleanup
        unsafe {
            env::remove_var("ITINERARY__PROVIDER__KIND");
            env::remove_var("ITINERARY__LOGGING__FORMAT");
        }

        let config = result.unwrap();
        assert_eq!(config.provider.kind, ProviderKind::Google);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = PathBuf::from("/nonexistent/itinerary/config.toml");
        assert!(ItineraryConfig::load_from_path(Some(path)).is_err());
    }
}
