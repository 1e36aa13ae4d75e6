//! Turns station/date assignments into lookback windows.

use crate::joining::StationDates;
use crate::types::lookback_window::{LookbackWindow, WindowDateFormat};
use chrono::{Days, NaiveDate};
use polars::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("Observation date '{value}' is not a YYYY-MM-DD date")]
    DateParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Looking back {days_back} days from {date} leaves the supported date range")]
    OutOfRange { date: NaiveDate, days_back: u32 },
}

/// Reads the calendar date of a raw event date.
///
/// Anything after the first `/` (the end of a date range) and then after the
/// first `T` (a time of day) is dropped; what remains must be `YYYY-MM-DD`.
///
/// # Examples
///
/// ```
/// use sighting_weather::parse_event_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2023, 8, 10).unwrap();
/// assert_eq!(parse_event_date("2023-08-10T12:00:00").unwrap(), expected);
/// assert_eq!(parse_event_date("2023-08-10/2023-08-11").unwrap(), expected);
/// ```
pub fn parse_event_date(raw: &str) -> Result<NaiveDate, WindowError> {
    let date = raw.split('/').next().unwrap_or(raw);
    let date = date.split('T').next().unwrap_or(date);
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|source| WindowError::DateParse {
        value: raw.to_string(),
        source,
    })
}

/// Builds one window per (station, date) pair, ending on the observation
/// date and starting `days_back` days earlier.
///
/// Rows follow the iteration order of `station_dates`; nothing is sorted or
/// deduplicated.
pub fn build_lookback_windows(
    station_dates: &StationDates,
    days_back: u32,
) -> Result<Vec<LookbackWindow>, WindowError> {
    let mut windows = Vec::with_capacity(station_dates.date_count());
    for (station_id, dates) in station_dates.iter() {
        for raw in dates {
            let end = parse_event_date(raw)?;
            let start = end
                .checked_sub_days(Days::new(u64::from(days_back)))
                .ok_or(WindowError::OutOfRange {
                    date: end,
                    days_back,
                })?;
            windows.push(LookbackWindow {
                station_id,
                start,
                end,
            });
        }
    }
    Ok(windows)
}

/// Lays windows out as a table with `id`, `start_date` and `end_date` columns.
pub fn windows_to_frame(
    windows: &[LookbackWindow],
    format: WindowDateFormat,
) -> PolarsResult<DataFrame> {
    let ids: Vec<i64> = windows.iter().map(|w| w.station_id).collect();
    let starts: Vec<String> = windows.iter().map(|w| w.start_label(format)).collect();
    let ends: Vec<String> = windows.iter().map(|w| w.end_label(format)).collect();
    df!(
        "id" => ids,
        "start_date" => starts,
        "end_date" => ends
    )
}
