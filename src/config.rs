use std::{env, fs};
use std::path::Path;
use chrono::{NaiveDate, NaiveDateTime};
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

/// Default configuration file looked for in the working directory when no `--config=` is given
const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Environment variable overriding the AccuWeather API key
const API_KEY_ENV: &str = "WEATHER_API_KEY";

#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    OpenMeteo,
    AccuWeather,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct ForecastParameters {
    pub provider: ProviderKind,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub location_key: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ForecastParameters {
    fn default() -> Self {
        Self {
            provider: ProviderKind::OpenMeteo,
            latitude: 13.7563,
            longitude: 100.5018,
            timezone: "Asia/Bangkok".into(),
            location_key: "49785".into(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct DisplayParameters {
    pub utc_offset_secs: i32,
    pub anchor: NaiveDateTime,
}

impl Default for DisplayParameters {
    fn default() -> Self {
        Self {
            utc_offset_secs: 7 * 3600,
            anchor: NaiveDate::from_ymd_opt(2021, 1, 14)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap_or_default(),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Files {
    pub template: String,
    pub output: String,
}

impl Default for Files {
    fn default() -> Self {
        Self {
            template: "template.svg".into(),
            output: "chat.svg".into(),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct General {
    pub log_path: Option<String>,
    pub log_level: LevelFilter,
    pub log_to_stderr: bool,
}

impl Default for General {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LevelFilter::Info,
            log_to_stderr: true,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct MailParameters {
    pub smtp_user: String,
    pub smtp_password: String,
    pub smtp_endpoint: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub report_success: bool,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub forecast: ForecastParameters,
    pub display: DisplayParameters,
    pub files: Files,
    pub general: General,
    pub mail: Option<MailParameters>,
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// Without an explicit path, `config.toml` in the working directory is used if it exists,
/// otherwise built-in defaults apply. The API key is always overridden from the environment
/// when `WEATHER_API_KEY` is set.
///
/// # Arguments
///
/// * 'config_path' - optional path to the configuration file
pub fn load_config(config_path: Option<&str>) -> Result<Config, LoadConfigurationError> {
    let config = match config_path {
        Some(path) => read_config(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => read_config(DEFAULT_CONFIG_PATH)?,
        None => Config::default(),
    };

    Ok(with_env_api_key(config, env::var(API_KEY_ENV).ok()))
}

/// Reads and parses a TOML configuration file
///
/// # Arguments
///
/// * 'path' - path to the configuration file
fn read_config(path: &str) -> Result<Config, LoadConfigurationError> {
    let toml = fs::read_to_string(path)
        .map_err(|e| LoadConfigurationError::FileError(path.to_string(), e))?;

    parse_config(&toml)
}

/// Parses configuration from a TOML string
///
/// # Arguments
///
/// * 'toml' - the configuration document
pub fn parse_config(toml: &str) -> Result<Config, LoadConfigurationError> {
    Ok(toml::from_str(toml)?)
}

/// Overlays an API key taken from the environment, empty values are ignored
///
/// # Arguments
///
/// * 'config' - configuration to update
/// * 'api_key' - key read from the environment, if any
fn with_env_api_key(mut config: Config, api_key: Option<String>) -> Config {
    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
        config.forecast.api_key = Some(key);
    }
    config
}

/// Error depicting errors that occur while loading the configuration
///
#[derive(Debug, Error)]
pub enum LoadConfigurationError {
    #[error("FileError: {0}: {1}")]
    FileError(String, #[source] std::io::Error),
    #[error("ParseError: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = parse_config("").unwrap();

        assert_eq!(config.forecast.provider, ProviderKind::OpenMeteo);
        assert_eq!(config.forecast.timezone, "Asia/Bangkok");
        assert_eq!(config.forecast.timeout_secs, 30);
        assert_eq!(config.display.utc_offset_secs, 25200);
        assert_eq!(config.display.anchor.to_string(), "2021-01-14 00:00:00");
        assert_eq!(config.files.template, "template.svg");
        assert_eq!(config.files.output, "chat.svg");
        assert_eq!(config.general.log_level, LevelFilter::Info);
        assert!(config.general.log_to_stderr);
        assert!(config.mail.is_none());
    }

    #[test]
    fn test_partial_document() {
        let toml = r#"
            [forecast]
            provider = "accu_weather"
            location_key = "12345"

            [display]
            anchor = "2019-05-01T12:00:00"

            [files]
            output = "out/badge.svg"

            [general]
            log_level = "debug"
        "#;
        let config = parse_config(toml).unwrap();

        assert_eq!(config.forecast.provider, ProviderKind::AccuWeather);
        assert_eq!(config.forecast.location_key, "12345");
        assert_eq!(config.forecast.latitude, 13.7563);
        assert_eq!(config.display.anchor.to_string(), "2019-05-01 12:00:00");
        assert_eq!(config.files.template, "template.svg");
        assert_eq!(config.files.output, "out/badge.svg");
        assert_eq!(config.general.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_mail_section() {
        let toml = r#"
            [mail]
            smtp_user = "user"
            smtp_password = "secret"
            smtp_endpoint = "smtp.example.com"
            from = "Badge <badge@example.com>"
            to = "Me <me@example.com>"
        "#;
        let mail = parse_config(toml).unwrap().mail.unwrap();

        assert_eq!(mail.smtp_endpoint, "smtp.example.com");
        assert!(!mail.report_success);
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let toml = "[forecast]\nprovider = \"weather_underground\"\n";
        assert!(matches!(parse_config(toml), Err(LoadConfigurationError::ParseError(_))));
    }

    #[test]
    fn test_env_api_key_overrides() {
        let config = parse_config("[forecast]\napi_key = \"from-file\"\n").unwrap();

        let config = with_env_api_key(config, Some("from-env".into()));
        assert_eq!(config.forecast.api_key.as_deref(), Some("from-env"));

        let config = with_env_api_key(config, Some("  ".into()));
        assert_eq!(config.forecast.api_key.as_deref(), Some("from-env"));

        let config = with_env_api_key(config, None);
        assert_eq!(config.forecast.api_key.as_deref(), Some("from-env"));
    }
}
