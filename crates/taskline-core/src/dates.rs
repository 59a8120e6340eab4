//! Date Helpers
//!
//! The backend is loose about date formats, so parsing accepts RFC 3339,
//! `YYYY-MM-DD HH:MM:SS` and bare `YYYY-MM-DD`. Everything is held in UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};

pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Date format used by filter params and date inputs
pub const DAY_FORMAT: &str = "%Y-%m-%d";

pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    parse_date(raw).map(start_of_day)
}

/// Parse a `YYYY-MM-DD` input value; empty input is None
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, DAY_FORMAT).ok()
}

pub fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// Wire format for item dates
pub fn to_wire(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Browser clocks report epoch milliseconds as f64
pub fn from_epoch_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(millis as i64).single()
}

/// Span between two instants in (fractional) days, negative when reversed
pub fn days_between(start: &DateTime<Utc>, end: &DateTime<Utc>) -> f64 {
    (*end - *start).num_milliseconds() as f64 / MILLIS_PER_DAY as f64
}

/// serde adapter for item dates: lenient on input, RFC 3339 on output
pub mod flexible {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_wire(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_datetime(&raw)
            .ok_or_else(|| de::Error::custom(format!("unrecognized date: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_datetime_formats() {
        let rfc = parse_datetime("2024-03-01T08:30:00.000Z").unwrap();
        assert_eq!(rfc.day(), 1);
        let spaced = parse_datetime("2024-03-01 08:30:00").unwrap();
        assert_eq!(rfc, spaced);
        let bare = parse_datetime("2024-03-01").unwrap();
        assert_eq!(bare, start_of_day(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert!(parse_datetime("").is_none());
        assert!(parse_datetime("next tuesday").is_none());
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date(" 2024-02-29 "), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_days_between_is_signed() {
        let a = parse_datetime("2024-03-01").unwrap();
        let b = parse_datetime("2024-03-15").unwrap();
        assert_eq!(days_between(&a, &b), 14.0);
        assert_eq!(days_between(&b, &a), -14.0);
    }

    #[test]
    fn test_from_epoch_millis() {
        let dt = from_epoch_millis(1_709_251_200_000.0).unwrap();
        assert_eq!(format_day(dt.date_naive()), "2024-03-01");
        assert!(from_epoch_millis(f64::NAN).is_none());
    }
}
