mod models;

use std::time::Duration;
use log::{debug, info};
use reqwest::blocking::Client;
use thiserror::Error;
use crate::config::{ForecastParameters, ProviderKind};
use crate::models::DailyForecast;
use crate::manager_forecast::models::{AccuResponse, OpenMeteoResponse};

const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";
const ACCU_WEATHER_URL: &str = "http://dataservice.accuweather.com/forecasts/v1/daily/1day";

/// Performs the single GET request of a run
///
/// Implemented over reqwest for real runs and replaced by canned responses in tests.
pub trait Transport {
    /// Returns the body of a successful (2xx) response
    ///
    /// # Arguments
    ///
    /// * 'url' - the url to get
    /// * 'query' - query pairs appended to the url
    fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, ForecastError>;
}

/// Blocking reqwest transport with a bounded request timeout
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Returns a transport ready for use
    ///
    /// # Arguments
    ///
    /// * 'timeout' - timeout for the whole request
    pub fn new(timeout: Duration) -> Result<HttpTransport, ForecastError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, ForecastError> {
        let response = self.client
            .get(url)
            .query(query)
            .send()?
            .error_for_status()?;

        Ok(response.text()?)
    }
}

/// Where the forecast comes from
#[derive(Debug, Clone, PartialEq)]
pub enum Provider {
    /// Key-less Open-Meteo endpoint reporting WMO weather codes
    OpenMeteo { latitude: f64, longitude: f64, timezone: String },
    /// Legacy AccuWeather endpoint reporting AccuWeather icon numbers
    AccuWeather { location_key: String, api_key: String },
}

impl Provider {
    /// Builds the provider from configuration
    ///
    /// # Arguments
    ///
    /// * 'config' - forecast configuration
    pub fn from_config(config: &ForecastParameters) -> Result<Provider, ForecastError> {
        match config.provider {
            ProviderKind::OpenMeteo => Ok(Provider::OpenMeteo {
                latitude: config.latitude,
                longitude: config.longitude,
                timezone: config.timezone.clone(),
            }),
            ProviderKind::AccuWeather => {
                let api_key = config.api_key.clone().ok_or(ForecastError::MissingApiKey)?;
                Ok(Provider::AccuWeather {
                    location_key: config.location_key.clone(),
                    api_key,
                })
            }
        }
    }

    /// Returns which kind of provider this is, used to pick the glyph table
    ///
    pub fn kind(&self) -> ProviderKind {
        match self {
            Provider::OpenMeteo { .. } => ProviderKind::OpenMeteo,
            Provider::AccuWeather { .. } => ProviderKind::AccuWeather,
        }
    }
}

/// Struct for fetching today's forecast
pub struct Forecast<T: Transport> {
    transport: T,
    provider: Provider,
}

impl<T: Transport> Forecast<T> {
    /// Returns a forecast struct ready for fetching today's forecast
    ///
    /// # Arguments
    ///
    /// * 'provider' - the provider and location to ask
    /// * 'transport' - transport used for the request
    pub fn new(provider: Provider, transport: T) -> Forecast<T> {
        Forecast { transport, provider }
    }

    /// Returns the provider the forecast is fetched from
    ///
    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// Retrieves the forecast for today
    ///
    pub fn new_forecast(&self) -> Result<DailyForecast, ForecastError> {
        let forecast = match &self.provider {
            Provider::OpenMeteo { latitude, longitude, timezone } => {
                let latitude = latitude.to_string();
                let longitude = longitude.to_string();
                let query = [
                    ("latitude", latitude.as_str()),
                    ("longitude", longitude.as_str()),
                    ("daily", "temperature_2m_max,weather_code"),
                    ("temperature_unit", "fahrenheit"),
                    ("timezone", timezone.as_str()),
                    ("forecast_days", "1"),
                ];
                debug!("requesting {} for {},{}", OPEN_METEO_URL, latitude, longitude);

                let json = self.transport.get_text(OPEN_METEO_URL, &query)?;
                parse_open_meteo(&json)?
            }
            Provider::AccuWeather { location_key, api_key } => {
                let url = format!("{}/{}", ACCU_WEATHER_URL, location_key);
                debug!("requesting {}", url);

                let json = self.transport.get_text(&url, &[("apikey", api_key.as_str())])?;
                parse_accu_weather(&json)?
            }
        };

        info!("forecast max temperature: {}°F, condition code: {}", forecast.max_temp_f, forecast.condition_code);

        Ok(forecast)
    }
}

/// Picks today's values from an Open-Meteo daily forecast document
///
/// # Arguments
///
/// * 'json' - the response body
fn parse_open_meteo(json: &str) -> Result<DailyForecast, ForecastError> {
    let doc: OpenMeteoResponse = serde_json::from_str(json)
        .map_err(|e| ForecastError::ParseError(e.to_string()))?;

    let max_temp_f = doc.daily.temperature_2m_max.first().copied().flatten()
        .ok_or_else(|| ForecastError::MissingData("daily.temperature_2m_max".into()))?;
    let condition_code = doc.daily.weather_code.first().copied().flatten()
        .ok_or_else(|| ForecastError::MissingData("daily.weather_code".into()))?;

    if let Some(date) = doc.daily.time.first() {
        debug!("forecast date: {}", date);
    }

    Ok(DailyForecast { max_temp_f, condition_code })
}

/// Picks today's values from an AccuWeather one day forecast document
///
/// # Arguments
///
/// * 'json' - the response body
fn parse_accu_weather(json: &str) -> Result<DailyForecast, ForecastError> {
    let doc: AccuResponse = serde_json::from_str(json)
        .map_err(|e| ForecastError::ParseError(e.to_string()))?;

    let today = doc.daily_forecasts.first()
        .ok_or_else(|| ForecastError::MissingData("DailyForecasts".into()))?;

    let maximum = &today.temperature.maximum;
    let max_temp_f = if maximum.unit.eq_ignore_ascii_case("C") {
        maximum.value * 9.0 / 5.0 + 32.0
    } else {
        maximum.value
    };

    Ok(DailyForecast { max_temp_f, condition_code: today.day.icon })
}

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("NetworkError: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("ParseError: {0}")]
    ParseError(String),
    #[error("MissingData: no value for {0}")]
    MissingData(String),
    #[error("MissingApiKey: the legacy provider needs an api key")]
    MissingApiKey,
}
