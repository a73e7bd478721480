//! Conversions between the human-facing date/time inputs of the tools and the
//! UTC timestamps the API expects.

use crate::constants::formats;
use crate::errors::ToolError;
use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

pub fn parse_date(value: &str, label: &str) -> Result<NaiveDate, ToolError> {
    NaiveDate::parse_from_str(value.trim(), formats::DATE).map_err(|_| {
        ToolError::invalid_params(format!(
            "{}: invalid date '{}', expected YYYY-MM-DD",
            label, value
        ))
    })
}

pub fn parse_time(value: &str, label: &str) -> Result<NaiveTime, ToolError> {
    NaiveTime::parse_from_str(value.trim(), formats::TIME).map_err(|_| {
        ToolError::invalid_params(format!(
            "{}: invalid time '{}', expected HH:MM between 00:00 and 23:59",
            label, value
        ))
    })
}

/// Canonical API form: `YYYY-MM-DDTHH:MM:SSZ`.
pub fn to_api_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(formats::API_TIMESTAMP).to_string()
}

/// Interprets a wall-clock date and time in `tz` and returns the UTC instant.
///
/// Ambiguous wall times (DST fall-back) resolve to the earlier instant; times
/// inside a DST gap do not exist and are rejected.
pub fn combine_in<Tz: TimeZone>(
    tz: &Tz,
    date: NaiveDate,
    time: NaiveTime,
) -> Result<DateTime<Utc>, ToolError> {
    let wall = NaiveDateTime::new(date, time);
    match tz.from_local_datetime(&wall) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(ToolError::invalid_params(format!(
            "{} {} does not exist in the local timezone (daylight saving transition)",
            date.format(formats::DATE),
            time.format(formats::TIME)
        ))),
    }
}

/// `date` + `time` in the process's local timezone, rendered for the API.
pub fn combine_local(date: NaiveDate, time: NaiveTime) -> Result<String, ToolError> {
    combine_in(&Local, date, time).map(to_api_timestamp)
}

pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Inclusive calendar-day range used by entry listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DayRange {
    /// Each missing bound falls back to `today` on its own.
    pub fn resolve(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self, ToolError> {
        let range = Self {
            from: from.unwrap_or(today),
            to: to.unwrap_or(today),
        };
        if range.from > range.to {
            return Err(ToolError::invalid_params(format!(
                "date_from ({}) must not be after date_to ({})",
                range.from.format(formats::DATE),
                range.to.format(formats::DATE)
            )));
        }
        Ok(range)
    }

    /// `[from 00:00:00, to 23:59:59]` in `tz`, as API timestamps. The end is
    /// one second before the next day starts, so it stays on `to` across DST
    /// transitions.
    pub fn bounds_in<Tz: TimeZone>(&self, tz: &Tz) -> Result<(String, String), ToolError> {
        let start = day_start(tz, self.from)?;
        let next = self.to.succ_opt().ok_or_else(|| {
            ToolError::invalid_params(format!(
                "date_to ({}) is out of range",
                self.to.format(formats::DATE)
            ))
        })?;
        let end = day_start(tz, next)? - chrono::Duration::seconds(1);
        Ok((to_api_timestamp(start), to_api_timestamp(end)))
    }

    pub fn bounds_local(&self) -> Result<(String, String), ToolError> {
        self.bounds_in(&Local)
    }

    pub fn label_from(&self) -> String {
        self.from.format(formats::DATE).to_string()
    }

    pub fn label_to(&self) -> String {
        self.to.format(formats::DATE).to_string()
    }
}

// Midnight can fall into a DST gap in a few zones; the first valid minute after it is used.
fn day_start<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Result<DateTime<Utc>, ToolError> {
    let midnight = NaiveDateTime::new(date, NaiveTime::MIN);
    match combine_in(tz, date, NaiveTime::MIN) {
        Ok(instant) => Ok(instant),
        Err(err) => {
            for shift in 1..=120 {
                let candidate = midnight + chrono::Duration::minutes(shift);
                if let Ok(instant) = combine_in(tz, candidate.date(), candidate.time()) {
                    return Ok(instant);
                }
            }
            Err(err)
        }
    }
}

/// Parses a timestamp as returned by the API.
pub fn parse_api_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}
