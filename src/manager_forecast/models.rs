use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct OpenMeteoDaily {
    #[serde(default)]
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(alias = "weathercode")]
    pub weather_code: Vec<Option<u16>>,
}

#[derive(Deserialize, Debug)]
pub struct OpenMeteoResponse {
    pub daily: OpenMeteoDaily,
}

#[derive(Deserialize, Debug)]
pub struct AccuValue {
    #[serde(rename = "Value")]
    pub value: f64,
    #[serde(rename = "Unit", default)]
    pub unit: String,
}

#[derive(Deserialize, Debug)]
pub struct AccuTemperature {
    #[serde(rename = "Maximum")]
    pub maximum: AccuValue,
}

#[derive(Deserialize, Debug)]
pub struct AccuDay {
    #[serde(rename = "Icon")]
    pub icon: u16,
}

#[derive(Deserialize, Debug)]
pub struct AccuDailyForecast {
    #[serde(rename = "Temperature")]
    pub temperature: AccuTemperature,
    #[serde(rename = "Day")]
    pub day: AccuDay,
}

#[derive(Deserialize, Debug)]
pub struct AccuResponse {
    #[serde(rename = "DailyForecasts")]
    pub daily_forecasts: Vec<AccuDailyForecast>,
}
