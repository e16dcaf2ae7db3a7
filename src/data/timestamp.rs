//! Parsing and formatting of `timestamp` cells.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::Value;

/// Date-time layouts accepted for text timestamps, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Date-only layouts, interpreted as midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a timestamp string like "2024-01-01T00:00:00", "2024-01-01 00:01:00.250",
/// "2024-01-01T00:00:00+02:00" (converted to UTC) or "2024-01-01".
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, format) {
            return Some(ts);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Convert a stored cell to a timestamp cell.
///
/// Integers and reals are Unix seconds, not nanoseconds as some dataframe
/// loaders assume for bare numbers. Anything that cannot be read as a
/// date-time becomes [`Value::Null`].
pub fn parse_value(value: Value) -> Value {
    if let Value::Timestamp(_) = value {
        return value;
    }

    let parsed = match &value {
        Value::Timestamp(_) | Value::Null => None,
        Value::Text(s) => parse_timestamp(s),
        Value::Integer(secs) => DateTime::from_timestamp(*secs, 0).map(|dt| dt.naive_utc()),
        Value::Real(secs) if secs.is_finite() => {
            let whole = secs.floor();
            let nanos = ((secs - whole) * 1_000_000_000.0) as u32;
            DateTime::from_timestamp(whole as i64, nanos).map(|dt| dt.naive_utc())
        }
        Value::Real(_) | Value::Blob(_) => None,
    };

    parsed.map_or(Value::Null, Value::Timestamp)
}

/// Format a timestamp for display
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Seconds since the Unix epoch, used as the chart x coordinate.
pub fn to_epoch_seconds(ts: NaiveDateTime) -> f64 {
    ts.and_utc().timestamp_millis() as f64 / 1000.0
}

/// Inverse of [`to_epoch_seconds`], for axis labels.
pub fn from_epoch_seconds(secs: f64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis((secs * 1000.0).round() as i64).map(|dt| dt.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_parse_iso() {
        assert_eq!(
            parse_timestamp("2024-01-01T00:01:00"),
            Some(ts("2024-01-01 00:01:00"))
        );
    }

    #[test]
    fn test_parse_space_separated_with_fraction() {
        let parsed = parse_timestamp("2024-01-01 00:01:00.250").unwrap();
        assert_eq!(parsed.and_utc().timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_parse_rfc3339_offset_is_utc() {
        assert_eq!(
            parse_timestamp("2024-01-01T02:00:00+02:00"),
            Some(ts("2024-01-01 00:00:00"))
        );
    }

    #[test]
    fn test_parse_date_only() {
        assert_eq!(parse_timestamp("2024-03-05"), Some(ts("2024-03-05 00:00:00")));
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_timestamp("N/A"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2024-13-45"), None);
    }

    #[test]
    fn test_parse_value_coerces_to_null() {
        assert_eq!(parse_value(Value::Text("N/A".into())), Value::Null);
        assert_eq!(parse_value(Value::Blob(vec![0])), Value::Null);
        assert_eq!(parse_value(Value::Null), Value::Null);
    }

    #[test]
    fn test_parse_value_epoch_seconds() {
        assert_eq!(
            parse_value(Value::Integer(1_704_067_200)),
            Value::Timestamp(ts("2024-01-01 00:00:00"))
        );
    }

    #[test]
    fn test_epoch_round_trip_for_labels() {
        let t = ts("2024-01-01 00:01:00");
        assert_eq!(from_epoch_seconds(to_epoch_seconds(t)), Some(t));
    }
}
