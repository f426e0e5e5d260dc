use std::path::Path;
use log::info;
use thiserror::Error;
use crate::clock::Clock;
use crate::config::Files;
use crate::display::{derive_fields, weekday_name, DisplaySettings, GlyphTable};
use crate::manager_forecast::{Forecast, ForecastError, Transport};
use crate::models::DisplayFields;
use crate::template::{render_file, TemplateError};

/// Runs one badge update: fetch today's forecast, derive the display fields and render the badge
///
/// Any failure ends the run before the output file is touched.
///
/// # Arguments
///
/// * 'forecast' - forecast fetcher for the configured provider
/// * 'clock' - source of the current instant
/// * 'settings' - offset and anchor for the time fields
/// * 'files' - template and output paths
pub fn run<T: Transport, C: Clock>(forecast: &Forecast<T>, clock: &C, settings: &DisplaySettings, files: &Files) -> Result<DisplayFields, WorkerError> {
    let daily = forecast.new_forecast()?;

    let glyphs = GlyphTable::for_provider(forecast.provider().kind());
    let fields = derive_fields(&daily, clock.now(), settings, &glyphs);

    info!("{}°F / {}°C {} on {}, {} since start, bubble width {}",
        fields.temp_f, fields.temp_c, fields.glyph, weekday_name(fields.weekday), fields.elapsed, fields.bubble_width);

    render_file(Path::new(&files.template), Path::new(&files.output), &fields)?;

    Ok(fields)
}

/// Error depicting errors that occur while updating the badge
///
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("error while fetching forecast: {0}")]
    FetchError(#[from] ForecastError),
    #[error("error while rendering badge: {0}")]
    RenderError(#[from] TemplateError),
}
