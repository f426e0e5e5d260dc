use chrono::Weekday;

/// Today's forecast as needed for the badge, independent of provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyForecast {
    pub max_temp_f: f64,
    pub condition_code: u16,
}

/// Values substituted into the badge template
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFields {
    pub temp_f: i64,
    pub temp_c: i64,
    pub glyph: &'static str,
    pub weekday: Weekday,
    pub elapsed: String,
    pub bubble_width: u32,
}
