//! `created_at` stamps: parsing, ordering and the long Japanese display form.

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Current time as an RFC 3339 UTC string, e.g. `2024-05-01T09:30:00.000Z`.
pub fn now_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339, the backend's `YYYY-MM-DD HH:MM:SS[.f][+TZ]` form and a
/// bare `YYYY-MM-DD`. Values without an offset are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at);
    }
    if let Ok(at) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(at);
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    Some(naive.and_utc().fixed_offset())
}

/// Order two stamps by instant when both parse, otherwise by their text.
pub fn compare_stamps(a: &str, b: &str) -> Ordering {
    match (parse_timestamp(a), parse_timestamp(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

/// Long date such as `2024年5月1日`, in the stamp's own offset.
///
/// Missing or unparseable stamps give an empty string.
pub fn format_date(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .map(|at| at.format("%Y年%-m月%-d日").to_string())
        .unwrap_or_default()
}
