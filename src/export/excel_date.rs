// src/export/excel_date.rs

use chrono::{NaiveDate, NaiveDateTime};

/// Interpret a report cell as a date or date-time, returning the Excel
/// serial number and the number format to display it with.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    let dt_formats = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

    for fmt in dt_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return excel_serial(&dt).map(|serial| ("yyyy-mm-dd hh:mm", serial));
        }
    }

    let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    excel_serial(&d.and_hms_opt(0, 0, 0)?).map(|serial| ("yyyy-mm-dd", serial))
}

/// Days since 1899-12-30, fraction of day included.
fn excel_serial(dt: &NaiveDateTime) -> Option<f64> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let secs = (*dt - epoch).num_seconds() as f64;
    Some(secs / 86_400.0)
}
