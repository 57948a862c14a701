//! ISO 8601 timestamps as written to the report.
//!
//! All report timestamps are UTC with millisecond precision and a `Z`
//! suffix, e.g. `2024-05-01T10:20:30.123Z`. Values are truncated to
//! milliseconds when captured so a parsed report compares equal to the one
//! that was written.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use std::time::SystemTime;

/// Converts a filesystem time to a report timestamp.
pub fn from_system_time(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time).trunc_subsecs(3)
}

/// The current time as a report timestamp.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

pub fn format(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn serialize<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(time))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_format_is_utc_millis_with_z() {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 10, 20, 30).unwrap();
        assert_eq!(format(&time), "2024-05-01T10:20:30.000Z");
    }

    #[test]
    fn test_from_system_time_truncates() {
        let time = UNIX_EPOCH + Duration::from_nanos(1_700_000_000_123_456_789);
        assert_eq!(format(&from_system_time(time)), "2023-11-14T22:13:20.123Z");
    }

    #[test]
    fn test_parse_accepts_offsets() {
        let parsed: DateTime<Utc> =
            deserialize(serde_json::Value::String("2024-05-01T12:20:30.500+02:00".into())).unwrap();
        assert_eq!(format(&parsed), "2024-05-01T10:20:30.500Z");
    }
}
