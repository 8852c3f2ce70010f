//! Best-effort date normalisation for spreadsheet cells
//!
//! Dates arrive either as spreadsheet serial numbers or as free text.
//! Anything that cannot be read as a calendar date becomes `None`, never an
//! error.

use calamine::Data;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

/// Largest serial the 1900 date system can represent (9999-12-31)
const MAX_SERIAL: f64 = 2_958_465.0;

/// Serial 60 is the non-existent 1900-02-29 kept for Lotus compatibility
const PHANTOM_LEAP_DAY: i64 = 60;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Date-only text formats, tried in order
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Date-time text formats without an offset; only the date part is kept
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Normalise a cell to a calendar date
pub fn normalize_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::Float(f) => date_from_serial(*f),
        Data::Int(i) => date_from_serial(*i as f64),
        Data::DateTime(dt) => date_from_serial(dt.as_f64()),
        Data::String(s) | Data::DateTimeIso(s) => parse_date_text(s),
        _ => None,
    }
}

/// Decode a 1900-system spreadsheet serial into its calendar day
pub fn date_from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > MAX_SERIAL {
        return None;
    }

    let mut day = serial.trunc() as i64;
    // Times within half a second of midnight round up to the next day
    if (serial.fract() * SECONDS_PER_DAY).round() >= SECONDS_PER_DAY {
        day += 1;
    }

    if day == PHANTOM_LEAP_DAY {
        return None;
    }

    let epoch = if day < PHANTOM_LEAP_DAY {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };

    epoch.checked_add_signed(Duration::days(day))
}

/// Parse a textual date in any of the accepted formats
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.date());
        }
    }

    log::debug!("Unrecognised date value: {:?}", text);
    None
}
