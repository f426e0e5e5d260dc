use std::env;
use std::time::Duration;
use log::info;
use thiserror::Error;
use crate::config::{load_config, Config, LoadConfigurationError};
use crate::display::DisplaySettings;
use crate::logging::{setup_logger, LoggerError};
use crate::manager_forecast::{Forecast, ForecastError, HttpTransport, Provider};
use crate::manager_mail::{Mail, MailError};

pub struct Mgr {
    pub forecast: Forecast<HttpTransport>,
    pub settings: DisplaySettings,
    pub mail: Option<Mail>,
}

/// Initializes and returns configuration and a Mgr struct holding the initialized structs
///
pub fn init() -> Result<(Config, Mgr), InitializationError> {
    let args: Vec<String> = env::args().collect();
    let config_path = config_path_arg(&args);

    // Load configuration
    let config = load_config(config_path)?;

    // Setup logging
    let _ = setup_logger(config.general.log_path.as_deref(), config.general.log_level, config.general.log_to_stderr)?;

    // Print version
    info!("starting weather badge version: {}", env!("CARGO_PKG_VERSION"));

    // Instantiate structs
    let provider = Provider::from_config(&config.forecast)?;
    let transport = HttpTransport::new(Duration::from_secs(config.forecast.timeout_secs))?;
    let forecast = Forecast::new(provider, transport);

    let settings = DisplaySettings::from_config(&config.display)
        .ok_or_else(|| InitializationError::DisplaySettingsError(format!("utc offset {} seconds", config.display.utc_offset_secs)))?;

    let mail = match &config.mail {
        Some(parameters) => Some(Mail::new(parameters)?),
        None => None,
    };

    let mgr = Mgr {
        forecast,
        settings,
        mail,
    };

    Ok((config, mgr))
}

/// Returns the value of a `--config=<path>` argument if present
///
/// # Arguments
///
/// * 'args' - command line arguments
fn config_path_arg(args: &[String]) -> Option<&str> {
    args.iter()
        .find_map(|a| a.strip_prefix("--config="))
        .filter(|p| !p.is_empty())
}

/// Error depicting errors that occur while initializing the badge updater
///
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("ConfigurationError: {0}")]
    ConfigurationError(#[from] LoadConfigurationError),
    #[error("SetupLoggerError: {0}")]
    SetupLoggerError(#[from] LoggerError),
    #[error("ForecastSetupError: {0}")]
    ForecastSetupError(#[from] ForecastError),
    #[error("DisplaySettingsError: {0}")]
    DisplaySettingsError(String),
    #[error("MailSetupError: {0}")]
    MailSetupError(#[from] MailError),
}
