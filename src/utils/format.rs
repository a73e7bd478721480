use crate::constants::formats;
use crate::utils::timestamps::parse_api_timestamp;
use chrono::{Local, TimeZone};

/// `"{H}h {MM}min"`, or `-` when unknown.
pub fn format_duration(seconds: Option<i64>) -> String {
    let Some(seconds) = seconds else {
        return "-".to_string();
    };
    let seconds = seconds.max(0);
    format!("{}h {:02}min", seconds / 3600, (seconds % 3600) / 60)
}

pub fn format_timestamp_in<Tz>(tz: &Tz, raw: Option<&str>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return "-".to_string();
    };
    match parse_api_timestamp(raw) {
        Some(instant) => instant
            .with_timezone(tz)
            .format(formats::DISPLAY_DATETIME)
            .to_string(),
        None => raw.to_string(),
    }
}

/// API timestamp rendered as local `DD.MM.YYYY, HH:MM`.
pub fn format_timestamp(raw: Option<&str>) -> String {
    format_timestamp_in(&Local, raw)
}

/// `since - until`, with `running` for an open interval.
pub fn format_interval(since: &str, until: Option<&str>) -> String {
    let end = match until {
        Some(until) => format_timestamp(Some(until)),
        None => "running".to_string(),
    };
    format!("{} - {}", format_timestamp(Some(since)), end)
}

pub fn name_or_id(name: Option<&str>, id: u64) -> String {
    match name.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => name.to_string(),
        None => id.to_string(),
    }
}

pub fn name_or_optional_id(name: Option<&str>, id: Option<u64>) -> String {
    match (name.map(str::trim).filter(|s| !s.is_empty()), id) {
        (Some(name), _) => name.to_string(),
        (None, Some(id)) => id.to_string(),
        (None, None) => "-".to_string(),
    }
}

pub fn text_or_dash(text: Option<&str>) -> &str {
    text.filter(|s| !s.trim().is_empty()).unwrap_or("-")
}
