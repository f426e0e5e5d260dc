use chrono::{DateTime, FixedOffset, Months, Datelike};
use crate::display::round_half_up;

const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2520;
const MINUTES_IN_MONTH: i64 = 43200;
const MINUTES_IN_TWO_MONTHS: i64 = 86400;

/// Returns the distance between two instants in words, without any "ago" or "in" wording
///
/// Short spans are expressed in minutes, hours and days, longer ones in months and years
/// with "about", "over" and "almost" qualifiers. The order of the arguments does not matter.
///
/// # Arguments
///
/// * 'from' - one instant
/// * 'to' - the other instant
pub fn distance_phrase(from: DateTime<FixedOffset>, to: DateTime<FixedOffset>) -> String {
    let (earlier, later) = if from <= to { (from, to) } else { (to, from) };

    let seconds = (later - earlier).num_seconds();
    let minutes = round_half_up(seconds as f64 / 60.0);

    if minutes < 2 {
        return if minutes == 0 {
            "less than a minute".to_string()
        } else {
            count_of(minutes, "minute")
        };
    }
    if minutes < 45 {
        return count_of(minutes, "minute");
    }
    if minutes < 90 {
        return "about 1 hour".to_string();
    }
    if minutes < MINUTES_IN_DAY {
        let hours = round_half_up(minutes as f64 / 60.0);
        return format!("about {}", count_of(hours, "hour"));
    }
    if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
        return "1 day".to_string();
    }
    if minutes < MINUTES_IN_MONTH {
        let days = round_half_up(minutes as f64 / MINUTES_IN_DAY as f64);
        return count_of(days, "day");
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        let months = round_half_up(minutes as f64 / MINUTES_IN_MONTH as f64);
        return format!("about {}", count_of(months, "month"));
    }

    let months = whole_months_between(earlier, later);
    if months < 12 {
        let nearest = round_half_up(minutes as f64 / MINUTES_IN_MONTH as f64);
        return count_of(nearest, "month");
    }

    let years = months / 12;
    match months % 12 {
        0..3 => format!("about {}", count_of(years, "year")),
        3..9 => format!("over {}", count_of(years, "year")),
        _ => format!("almost {}", count_of(years + 1, "year")),
    }
}

/// Number of complete calendar months from 'earlier' to 'later'
///
/// Month ends are clamped, so Jan 31 plus one month is the last day of February.
fn whole_months_between(earlier: DateTime<FixedOffset>, later: DateTime<FixedOffset>) -> i64 {
    let calendar = (later.year() - earlier.year()) as i64 * 12 + later.month() as i64 - earlier.month() as i64;
    if calendar <= 0 {
        return 0;
    }

    match earlier.checked_add_months(Months::new(calendar as u32)) {
        Some(shifted) if shifted > later => calendar - 1,
        _ => calendar,
    }
}

fn count_of(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};
    use super::*;

    fn anchor() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(7 * 3600).unwrap()
            .with_ymd_and_hms(2021, 1, 14, 0, 0, 0).unwrap()
    }

    fn after(delta: TimeDelta) -> String {
        distance_phrase(anchor(), anchor() + delta)
    }

    fn at(year: i32, month: u32, day: u32) -> String {
        let to = FixedOffset::east_opt(7 * 3600).unwrap()
            .with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap();
        distance_phrase(anchor(), to)
    }

    #[test]
    fn test_minutes() {
        assert_eq!(after(TimeDelta::seconds(0)), "less than a minute");
        assert_eq!(after(TimeDelta::seconds(29)), "less than a minute");
        assert_eq!(after(TimeDelta::seconds(30)), "1 minute");
        assert_eq!(after(TimeDelta::minutes(10)), "10 minutes");
        assert_eq!(after(TimeDelta::minutes(44)), "44 minutes");
    }

    #[test]
    fn test_hours() {
        assert_eq!(after(TimeDelta::minutes(45)), "about 1 hour");
        assert_eq!(after(TimeDelta::minutes(89)), "about 1 hour");
        assert_eq!(after(TimeDelta::minutes(90)), "about 2 hours");
        assert_eq!(after(TimeDelta::minutes(1439)), "about 24 hours");
    }

    #[test]
    fn test_days() {
        assert_eq!(after(TimeDelta::days(1)), "1 day");
        assert_eq!(after(TimeDelta::minutes(2519)), "1 day");
        assert_eq!(after(TimeDelta::minutes(2520)), "2 days");
        assert_eq!(after(TimeDelta::days(29)), "29 days");
    }

    #[test]
    fn test_months() {
        assert_eq!(after(TimeDelta::days(30)), "about 1 month");
        assert_eq!(after(TimeDelta::days(45)), "about 2 months");
        assert_eq!(after(TimeDelta::days(60)), "2 months");
        assert_eq!(at(2021, 12, 20), "11 months");
    }

    #[test]
    fn test_years() {
        assert_eq!(at(2022, 2, 14), "about 1 year");
        assert_eq!(at(2022, 6, 14), "over 1 year");
        assert_eq!(at(2023, 11, 14), "almost 3 years");
        assert_eq!(at(2026, 10, 16), "almost 6 years");
    }

    #[test]
    fn test_order_does_not_matter() {
        let later = anchor() + TimeDelta::days(500);
        assert_eq!(distance_phrase(later, anchor()), distance_phrase(anchor(), later));
    }

    #[test]
    fn test_whole_months_clamps_month_end() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let jan_31 = offset.with_ymd_and_hms(2021, 1, 31, 0, 0, 0).unwrap();
        let feb_27 = offset.with_ymd_and_hms(2021, 2, 27, 0, 0, 0).unwrap();
        let feb_28 = offset.with_ymd_and_hms(2021, 2, 28, 0, 0, 0).unwrap();

        assert_eq!(whole_months_between(jan_31, feb_27), 0);
        assert_eq!(whole_months_between(jan_31, feb_28), 1);
    }
}
