use chrono::{DateTime, Datelike, TimeZone};
use chrono_tz::Tz;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartDateFormat {
    Year,       // 2024
    Quarter,    // Q1
    Month,      // Jan
    MonthYear,  // Jan 2024
    DayMonth,   // 12 Jan
    HourMin,    // 10:30
    HourMinSec, // 10:30:15
    Full,       // 12 Jan 2024 10:30
    FullSec,    // 12 Jan 2024 10:30:15
}

/// Picks the precision of a hover timestamp from the visible span (seconds).
pub fn determine_date_format(visible_range_sec: f64) -> SmartDateFormat {
    const MINUTE: f64 = 60.0;

    if visible_range_sec > MINUTE * 5.0 {
        SmartDateFormat::Full
    } else {
        SmartDateFormat::FullSec
    }
}

pub fn format_date<T: TimeZone>(dt: &DateTime<T>, format: SmartDateFormat) -> String
where
    T::Offset: std::fmt::Display,
{
    match format {
        SmartDateFormat::Year => dt.format("%Y").to_string(),
        SmartDateFormat::Quarter => format!("Q{}", (dt.month0() / 3) + 1),
        SmartDateFormat::Month => dt.format("%b").to_string(),
        SmartDateFormat::MonthYear => dt.format("%b %Y").to_string(),
        SmartDateFormat::DayMonth => dt.format("%d %b").to_string(),
        SmartDateFormat::HourMin => dt.format("%H:%M").to_string(),
        SmartDateFormat::HourMinSec => dt.format("%H:%M:%S").to_string(),
        SmartDateFormat::Full => dt.format("%d %b %Y %H:%M").to_string(),
        SmartDateFormat::FullSec => dt.format("%d %b %Y %H:%M:%S").to_string(),
    }
}

/// Formats unix seconds in the given zone. Out-of-range values fall back to
/// the raw number.
pub fn format_timestamp(seconds: f64, format: SmartDateFormat, tz: Tz) -> String {
    match to_zoned(seconds, tz) {
        Some(dt) => format_date(&dt, format),
        None => format!("{:.2}", seconds),
    }
}

pub fn to_zoned(seconds: f64, tz: Tz) -> Option<DateTime<Tz>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9) as u32;
    match tz.timestamp_opt(whole as i64, nanos) {
        chrono::LocalResult::Single(d) => Some(d),
        chrono::LocalResult::Ambiguous(d, _) => Some(d),
        chrono::LocalResult::None => None,
    }
}

pub fn to_seconds<T: TimeZone>(dt: &DateTime<T>) -> f64 {
    dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 / 1e9
}
