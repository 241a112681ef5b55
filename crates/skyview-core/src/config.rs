use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use skyview_weather::geocode::DEFAULT_GEOCODING_URL;
use skyview_weather::provider::{DEFAULT_FORECAST_URL, DEFAULT_TIMEOUT_SECS};
use skyview_weather::ProviderSettings;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Environment variable overriding `weather.geocoding_url`
pub const GEOCODING_URL_ENV: &str = "SKYVIEW_GEOCODING_URL";
/// Environment variable overriding `weather.forecast_url`
pub const FORECAST_URL_ENV: &str = "SKYVIEW_FORECAST_URL";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Weather service settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Terminal display preferences
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the geocoding API
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// Base URL of the forecast API
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    /// Per-request timeout enforced by the HTTP client
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Cities tried in order at startup until one loads
    #[serde(default = "default_cities")]
    pub default_cities: Vec<String>,

    /// Preset cities offered in interactive mode
    #[serde(default = "default_quick_cities")]
    pub quick_cities: Vec<String>,
}

fn default_geocoding_url() -> String {
    DEFAULT_GEOCODING_URL.to_string()
}

fn default_forecast_url() -> String {
    DEFAULT_FORECAST_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_cities() -> Vec<String> {
    ["Nagpur", "Mumbai", "Delhi"].map(String::from).to_vec()
}

fn default_quick_cities() -> Vec<String> {
    ["Mumbai", "Pune", "Nagpur", "Nashik", "Aurangabad"]
        .map(String::from)
        .to_vec()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            request_timeout_secs: default_request_timeout_secs(),
            default_cities: default_cities(),
            quick_cities: default_quick_cities(),
        }
    }
}

impl WeatherConfig {
    pub fn provider_settings(&self) -> ProviderSettings {
        ProviderSettings {
            geocoding_url: self.geocoding_url.clone(),
            forecast_url: self.forecast_url.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Number of hours shown in the hourly strip
    #[serde(default = "default_hourly_window")]
    pub hourly_window: usize,
}

fn default_hourly_window() -> usize {
    6
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            hourly_window: default_hourly_window(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No config at {}, writing defaults", path.display());
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load, apply environment overrides and validate.
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let mut config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        config.apply_overrides(|key| std::env::var(key).ok());

        let validation = config.validate();
        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Override endpoint URLs from `lookup` (normally the process environment)
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(GEOCODING_URL_ENV).filter(|u| !u.is_empty()) {
            tracing::debug!("Geocoding URL overridden by {}", GEOCODING_URL_ENV);
            self.weather.geocoding_url = url;
        }
        if let Some(url) = lookup(FORECAST_URL_ENV).filter(|u| !u.is_empty()) {
            tracing::debug!("Forecast URL overridden by {}", FORECAST_URL_ENV);
            self.weather.forecast_url = url;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        validate_url(
            &self.weather.geocoding_url,
            "weather.geocoding_url",
            &mut result,
        );
        validate_url(
            &self.weather.forecast_url,
            "weather.forecast_url",
            &mut result,
        );

        if self.weather.request_timeout_secs == 0 {
            result.add_error(
                "weather.request_timeout_secs",
                "Request timeout must be greater than 0",
            );
        } else if self.weather.request_timeout_secs > 120 {
            result.add_warning(
                "weather.request_timeout_secs",
                "Request timeout is unusually long (>120s)",
            );
        }

        if self.weather.default_cities.is_empty() {
            result.add_error(
                "weather.default_cities",
                "At least one startup city is required",
            );
        } else if self.weather.default_cities.iter().any(|c| c.trim().is_empty()) {
            result.add_error("weather.default_cities", "City names cannot be blank");
        }

        if self.weather.quick_cities.iter().any(|c| c.trim().is_empty()) {
            result.add_warning("weather.quick_cities", "Blank quick-pick entries are ignored");
        }

        if self.display.hourly_window == 0 {
            result.add_error(
                "display.hourly_window",
                "Hourly window must be greater than 0",
            );
        } else if self.display.hourly_window > skyview_weather::normalize::HOURLY_ENTRIES {
            result.add_warning(
                "display.hourly_window",
                "Only 24 hours of data are available",
            );
        }

        result
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("skyview");

        Ok(config_dir.join("config.toml"))
    }
}

fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }

            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }

            if url.port() == Some(0) {
                result.add_error(field_name, "Port cannot be 0");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}
