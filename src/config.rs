use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::units::UnitPreference;

/// Environment variable that, when set, overrides the configured API key
pub const API_KEY_ENV: &str = "OPEN_WEATHER_API_KEY";

/// Values found in sample configurations that must never be sent as a credential
const PLACEHOLDER_KEYS: [&str; 6] = ["your_api_key", "your_api_key_here", "<api_key>", "api_key", "changeme", "xxx"];

#[derive(Deserialize)]
pub struct OpenWeather {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
}

#[derive(Deserialize)]
pub struct GeoLocation {
    #[serde(default = "default_lookup_url")]
    pub lookup_url: String,
    #[serde(default = "default_city")]
    pub default_city: String,
}

impl Default for GeoLocation {
    fn default() -> Self {
        Self { lookup_url: default_lookup_url(), default_city: default_city() }
    }
}

/// Language of labels and advisories
#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Sv,
}

/// Settings that used to differ between the individual dashboard variants
#[derive(Deserialize, Clone, Copy, Debug)]
pub struct DashboardSettings {
    #[serde(default)]
    pub units: UnitPreference,
    #[serde(default)]
    pub language: Language,
    #[serde(default = "default_true")]
    pub show_alerts: bool,
    #[serde(default = "default_true")]
    pub show_map: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self { units: UnitPreference::default(), language: Language::default(), show_alerts: true, show_map: true }
    }
}

#[derive(Deserialize)]
pub struct Files {
    pub snapshot_file: String,
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: LevelFilter,
    /// Off by default, stdout carries the rendered dashboard
    #[serde(default)]
    pub log_to_stdout: bool,
}

impl Default for General {
    fn default() -> Self {
        Self { log_path: None, log_level: default_log_level(), log_to_stdout: false }
    }
}

#[derive(Deserialize)]
pub struct Config {
    pub open_weather: OpenWeather,
    #[serde(default)]
    pub geo_location: GeoLocation,
    #[serde(default)]
    pub dashboard: DashboardSettings,
    pub files: Files,
    #[serde(default)]
    pub general: General,
}

fn default_forecast_url() -> String { "https://api.openweathermap.org/data/2.5/forecast".to_string() }
fn default_lookup_url() -> String { "https://ipinfo.io/json".to_string() }
fn default_city() -> String { "New York".to_string() }
fn default_log_level() -> LevelFilter { LevelFilter::Info }
fn default_true() -> bool { true }

/// Loads the configuration file and returns a struct with all configuration items
///
/// An API key given in the environment takes precedence over the one in the file.
/// The key itself is not validated here, an offline run doesn't need one.
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)
        .map_err(|e| ConfigError(format!("unable to read {}: {}", config_path, e)))?;

    let mut config = parse_config(&toml)?;

    if let Ok(api_key) = std::env::var(API_KEY_ENV) {
        config.open_weather.api_key = api_key;
    }

    Ok(config)
}

/// Parses configuration from a TOML document
///
/// # Arguments
///
/// * 'toml' - the configuration document
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    if config.files.snapshot_file.trim().is_empty() {
        return Err(ConfigError::from("files.snapshot_file must not be empty"));
    }

    Ok(config)
}

/// Checks that an API key is present and isn't a placeholder, returning the trimmed key
///
/// # Arguments
///
/// * 'api_key' - the key to check
pub fn validate_api_key(api_key: &str) -> Result<&str, ConfigError> {
    let key = api_key.trim();
    if key.is_empty() {
        return Err(ConfigError(format!("no OpenWeather API key configured, set open_weather.api_key or {}", API_KEY_ENV)));
    }

    let lower = key.to_lowercase();
    if PLACEHOLDER_KEYS.contains(&lower.as_str()) || (lower.starts_with('<') && lower.ends_with('>')) {
        return Err(ConfigError(format!("OpenWeather API key '{}' is a placeholder, set a real key", key)));
    }

    Ok(key)
}
