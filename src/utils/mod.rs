//! Utility functions and helpers.

pub mod http;
pub mod retry;
pub mod text;

use chrono::{Days, Local, NaiveDate};

use crate::error::{AppError, Result};

/// Date format used in notestock day URLs.
const COMPACT_DATE: &str = "%Y%m%d";

/// Yesterday's date in local time, formatted YYYYMMDD.
///
/// The bot runs shortly after midnight and digests the day that just
/// ended.
pub fn yesterday_compact() -> String {
    (Local::now().date_naive() - Days::new(1))
        .format(COMPACT_DATE)
        .to_string()
}

/// Parse an explicit date argument in YYYYMMDD form.
pub fn parse_compact_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, COMPACT_DATE)
        .map_err(|_| AppError::config(format!("invalid date '{}': expected YYYYMMDD", raw)))
}
