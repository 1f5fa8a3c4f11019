use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use chrono::NaiveTime;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::logging::setup_logger;
use crate::manager_openweather::OWMSettings;

const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

#[derive(Deserialize, Clone)]
pub struct General {
    pub log_path: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_true")]
    pub log_to_stdout: bool,
}

#[derive(Deserialize, Clone)]
pub struct WebServerParameters {
    pub bind_address: String,
    pub bind_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct Weather {
    pub city: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_units")]
    pub units: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Deserialize, Clone)]
pub struct Output {
    pub output_dir: PathBuf,
    pub icon_source_dir: PathBuf,
    #[serde(default)]
    pub status_file: Option<PathBuf>,
}

#[derive(Deserialize, Clone)]
pub struct Forecast {
    #[serde(default = "default_day_limit")]
    pub day_limit: usize,
    #[serde(default = "default_midday_sample")]
    pub midday_sample: String,
}

#[derive(Deserialize, Clone)]
pub struct Schedule {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_true")]
    pub enable_on_startup: bool,
}

#[derive(Deserialize, Clone)]
pub struct Config {
    pub general: General,
    pub web_server: WebServerParameters,
    pub weather: Weather,
    pub output: Output,
    #[serde(default)]
    pub forecast: Forecast,
    #[serde(default)]
    pub schedule: Schedule,
}

impl Default for Forecast {
    fn default() -> Self {
        Self { day_limit: default_day_limit(), midday_sample: default_midday_sample() }
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self { interval_secs: default_interval_secs(), enable_on_startup: true }
    }
}

impl Config {
    /// Returns the provider settings, the api key must have been resolved
    ///
    pub fn owm_settings(&self) -> OWMSettings {
        OWMSettings {
            base_url: self.weather.base_url.clone(),
            api_key: self.weather.api_key.clone().unwrap_or_default(),
            city: self.weather.city.clone(),
            units: self.weather.units.clone(),
            language: self.weather.language.clone(),
        }
    }

    pub fn midday(&self) -> Result<NaiveTime, ConfigError> {
        Ok(NaiveTime::parse_from_str(&self.forecast.midday_sample, "%H:%M:%S")?)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.schedule.interval_secs)
    }

    pub fn status_file(&self) -> PathBuf {
        self.output.status_file.clone()
            .unwrap_or_else(|| self.output.output_dir.join("auto_update_status.json"))
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_true() -> bool { true }
fn default_base_url() -> String { "http://api.openweathermap.org/data/2.5".to_string() }
fn default_units() -> String { "metric".to_string() }
fn default_language() -> String { "de".to_string() }
fn default_day_limit() -> usize { 3 }
fn default_midday_sample() -> String { "12:00:00".to_string() }
fn default_interval_secs() -> u64 { 3600 }

/// Loads the configuration file and sets up logging
///
/// The api key is taken from the config file or else from the OPENWEATHER_API_KEY
/// environment variable. Without one the application must not start.
///
/// # Arguments
///
/// * 'config_path' - path to the toml config file
pub fn config(config_path: &str) -> Result<Config, ConfigError> {
    let config = load_config(config_path, std::env::var(API_KEY_ENV).ok())?;

    let level = LevelFilter::from_str(&config.general.log_level)
        .map_err(|_| ConfigError(format!("invalid log level: {}", config.general.log_level)))?;
    setup_logger(&config.general.log_path, level, config.general.log_to_stdout)?;

    Ok(config)
}

/// Parses and validates the configuration without touching global state
///
/// # Arguments
///
/// * 'config_path' - path to the toml config file
/// * 'env_api_key' - api key from the environment, used when the file has none
pub fn load_config(config_path: &str, env_api_key: Option<String>) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;
    let mut config: Config = toml::from_str(&toml)?;

    let api_key = config.weather.api_key.take()
        .filter(|k| !k.trim().is_empty())
        .or(env_api_key.filter(|k| !k.trim().is_empty()))
        .ok_or(ConfigError::from("api key not set, use weather.api_key or OPENWEATHER_API_KEY"))?;
    config.weather.api_key = Some(api_key);

    if config.weather.city.trim().is_empty() {
        return Err(ConfigError::from("weather.city must not be empty"));
    }
    config.midday()?;
    if config.schedule.interval_secs == 0 {
        return Err(ConfigError::from("schedule.interval_secs must be greater than 0"));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"
[general]
log_path = "weatherboard.log"

[web_server]
bind_address = "127.0.0.1"
bind_port = 8080

[weather]
city = "Berlin"

[output]
output_dir = "output"
icon_source_dir = "Datenback_images"
"#;

    fn write_config(content: &str) -> (TempDir, String) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        (dir, path.to_string_lossy().to_string())
    }

    #[test]
    fn test_defaults() {
        let (_dir, path) = write_config(MINIMAL);
        let config = load_config(&path, Some("secret".to_string())).unwrap();

        assert_eq!(config.weather.api_key.as_deref(), Some("secret"));
        assert_eq!(config.weather.base_url, "http://api.openweathermap.org/data/2.5");
        assert_eq!(config.weather.units, "metric");
        assert_eq!(config.weather.language, "de");
        assert_eq!(config.forecast.day_limit, 3);
        assert_eq!(config.midday().unwrap(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert_eq!(config.interval(), Duration::from_secs(3600));
        assert!(config.schedule.enable_on_startup);
        assert_eq!(config.status_file(), PathBuf::from("output/auto_update_status.json"));
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let (_dir, path) = write_config(MINIMAL);

        assert!(load_config(&path, None).is_err());
        assert!(load_config(&path, Some("  ".to_string())).is_err());
    }

    #[test]
    fn test_file_api_key_wins() {
        let content = MINIMAL.replace("city = \"Berlin\"", "city = \"Berlin\"\napi_key = \"from-file\"");
        let (_dir, path) = write_config(&content);

        let config = load_config(&path, Some("from-env".to_string())).unwrap();

        assert_eq!(config.weather.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_invalid_midday_sample() {
        let content = format!("{}\n[forecast]\nmidday_sample = \"noon\"\n", MINIMAL);
        let (_dir, path) = write_config(&content);

        assert!(load_config(&path, Some("secret".to_string())).is_err());
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let content = format!("{}\n[schedule]\ninterval_secs = 0\n", MINIMAL);
        let (_dir, path) = write_config(&content);

        match load_config(&path, Some("secret".to_string())) {
            Err(e) => assert!(e.0.contains("interval_secs")),
            Ok(_) => panic!("zero interval accepted"),
        }
    }

    #[test]
    fn test_missing_file() {
        assert!(load_config("/nonexistent/config.toml", Some("secret".to_string())).is_err());
    }
}
