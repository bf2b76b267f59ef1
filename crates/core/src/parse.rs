//! Tolerant parsers for typed spreadsheet cells.
//!
//! Every parser returns `None` on anything it does not understand. The
//! import engine treats `None` as "leave the field unset" and never reports
//! it as a row error.

use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::types::Date;

/// Date-only formats, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d-%b-%Y", "%B %d, %Y"];

/// Date-time formats whose date part is kept.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
];

/// Largest serial Excel can represent (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Parse a date cell.
///
/// Accepts ISO dates, US `m/d/yyyy`, `d-Mon-yyyy`, long-form month names,
/// common date-time renderings, and raw Excel serial day numbers.
pub fn parse_date(value: &str) -> Option<Date> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
    }
    excel_serial_to_date(value.parse::<f64>().ok()?)
}

/// Convert an Excel serial day number (1900 date system) to a date.
pub fn excel_serial_to_date(serial: f64) -> Option<Date> {
    if !serial.is_finite() || !(1.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    // 1899-12-30 absorbs Excel's fictitious 1900-02-29.
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_days(Days::new(serial.trunc() as u64))
}

/// Parse a currency cell.
///
/// A single leading `$` is stripped and the remainder must be a plain
/// decimal number. Thousands separators are not accepted, so `"$1,234"`
/// yields `None`.
pub fn parse_currency(value: &str) -> Option<f64> {
    let value = value.trim();
    let amount = value.strip_prefix('$').unwrap_or(value).trim();
    if amount.is_empty() {
        return None;
    }
    amount.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a yes/no style flag cell.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "enabled" => Some(true),
        "false" | "no" | "n" | "0" | "disabled" => Some(false),
        _ => None,
    }
}

/// `None` for blank text, otherwise the trimmed text.
pub fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
