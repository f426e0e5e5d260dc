use chrono::{DateTime, FixedOffset, Utc, Weekday, Datelike};
use crate::config::{DisplayParameters, ProviderKind};
use crate::elapsed::distance_phrase;
use crate::models::{DailyForecast, DisplayFields};

/// Glyph used for any condition code missing from a table
pub const DEFAULT_GLYPH: &str = "🌡";

/// WMO weather interpretation codes as reported by Open-Meteo.
/// Thunderstorm codes 95, 96 and 99 are separate entries.
const WMO_GLYPHS: &[(u16, &str)] = &[
    (0, "☀️"),
    (1, "🌤"),
    (2, "⛅"),
    (3, "☁️"),
    (45, "🌫"),
    (48, "🌫"),
    (51, "🌦"),
    (53, "🌦"),
    (55, "🌦"),
    (56, "🌧"),
    (57, "🌧"),
    (61, "🌦"),
    (63, "🌧"),
    (65, "🌧"),
    (66, "🌧"),
    (67, "🌧"),
    (71, "🌨"),
    (73, "🌨"),
    (75, "❄️"),
    (77, "🌨"),
    (80, "🌦"),
    (81, "🌧"),
    (82, "🌧"),
    (85, "🌨"),
    (86, "❄️"),
    (95, "🌩"),
    (96, "⛈"),
    (99, "⛈"),
];

/// AccuWeather day icon numbers
const ACCU_WEATHER_GLYPHS: &[(u16, &str)] = &[
    (1, "☀️"),
    (2, "☀️"),
    (3, "🌤"),
    (4, "🌤"),
    (5, "🌤"),
    (6, "🌥"),
    (7, "☁️"),
    (8, "☁️"),
    (11, "🌫"),
    (12, "🌧"),
    (13, "🌦"),
    (14, "🌦"),
    (15, "⛈"),
    (16, "⛈"),
    (17, "🌦"),
    (18, "🌧"),
    (19, "🌨"),
    (20, "🌨"),
    (21, "🌨"),
    (22, "❄️"),
    (23, "❄️"),
    (24, "🌧"),
    (25, "🌧"),
    (26, "🌧"),
    (29, "🌧"),
    (30, "🥵"),
    (31, "🥶"),
    (32, "💨"),
];

/// Immutable mapping from a provider's condition codes to display glyphs
#[derive(Debug, Clone, Copy)]
pub struct GlyphTable {
    entries: &'static [(u16, &'static str)],
    default: &'static str,
}

impl GlyphTable {
    /// Returns the table matching the code set the provider reports
    ///
    /// # Arguments
    ///
    /// * 'provider' - the configured forecast provider
    pub fn for_provider(provider: ProviderKind) -> GlyphTable {
        let entries = match provider {
            ProviderKind::OpenMeteo => WMO_GLYPHS,
            ProviderKind::AccuWeather => ACCU_WEATHER_GLYPHS,
        };

        GlyphTable { entries, default: DEFAULT_GLYPH }
    }

    /// Exact match lookup, unknown codes give the default glyph
    pub fn glyph(&self, code: u16) -> &'static str {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, g)| *g)
            .unwrap_or(self.default)
    }
}

/// Time related display settings
#[derive(Debug, Clone, Copy)]
pub struct DisplaySettings {
    pub offset: FixedOffset,
    pub anchor: DateTime<FixedOffset>,
}

impl DisplaySettings {
    /// Builds settings from configuration, None if the offset is out of range
    ///
    /// # Arguments
    ///
    /// * 'config' - display configuration
    pub fn from_config(config: &DisplayParameters) -> Option<DisplaySettings> {
        let offset = FixedOffset::east_opt(config.utc_offset_secs)?;
        let anchor = config.anchor.and_local_timezone(offset).single()?;

        Some(DisplaySettings { offset, anchor })
    }
}

/// Derives all template values from today's forecast and the current instant
///
/// # Arguments
///
/// * 'forecast' - today's forecast
/// * 'now' - the current instant
/// * 'settings' - offset and anchor for the time fields
/// * 'glyphs' - glyph table for the provider's condition codes
pub fn derive_fields(forecast: &DailyForecast, now: DateTime<Utc>, settings: &DisplaySettings, glyphs: &GlyphTable) -> DisplayFields {
    let temp_f = round_half_up(forecast.max_temp_f);
    let local_now = now.with_timezone(&settings.offset);
    let weekday = local_now.weekday();

    DisplayFields {
        temp_f,
        temp_c: fahrenheit_to_celsius(temp_f),
        glyph: glyphs.glyph(forecast.condition_code),
        weekday,
        elapsed: distance_phrase(settings.anchor, local_now),
        bubble_width: bubble_width(weekday),
    }
}

/// Rounds to the nearest integer with halves going up (2.5 -> 3, -2.5 -> -2)
///
/// # Arguments
///
/// * 'value' - value to round
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Converts an already rounded Fahrenheit value and rounds the result again
///
/// # Arguments
///
/// * 'temp_f' - temperature in Fahrenheit
pub fn fahrenheit_to_celsius(temp_f: i64) -> i64 {
    round_half_up((temp_f as f64 - 32.0) * 5.0 / 9.0)
}

/// Full English weekday name
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Width in pixels of the speech bubble holding the weekday name
pub fn bubble_width(weekday: Weekday) -> u32 {
    match weekday {
        Weekday::Mon => 235,
        Weekday::Tue => 235,
        Weekday::Wed => 260,
        Weekday::Thu => 245,
        Weekday::Fri => 220,
        Weekday::Sat => 245,
        Weekday::Sun => 230,
    }
}
