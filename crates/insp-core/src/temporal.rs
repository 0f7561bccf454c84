//! # Temporal Types: UTC Timestamps and Inspection Dates
//!
//! `Timestamp` is a UTC-only instant truncated to seconds, rendered as
//! `YYYY-MM-DDTHH:MM:SSZ`. Non-UTC or sub-second inputs are **rejected at
//! construction** by the strict parser, and deserialization goes through
//! the same parser.
//!
//! `InspectionDate` is the calendar date an inspection was carried out,
//! rendered and parsed as ISO `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InspError;

/// A UTC-only timestamp, truncated to seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse a timestamp from an RFC 3339 string.
    ///
    /// Only the `Z` suffix is accepted. Explicit offsets, including `+00:00`,
    /// are rejected, as are fractional seconds.
    pub fn parse(s: &str) -> Result<Self, InspError> {
        if !s.ends_with('Z') {
            return Err(InspError::Validation(format!(
                "timestamp must use Z suffix (UTC only), got: {s:?}"
            )));
        }

        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| {
            InspError::Validation(format!("invalid RFC 3339 timestamp {s:?}: {e}"))
        })?;

        if dt.nanosecond() != 0 {
            return Err(InspError::Validation(format!(
                "timestamp must have whole-second precision, got: {s:?}"
            )));
        }

        Ok(Self(dt.with_timezone(&Utc)))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// The calendar date (UTC) of this instant.
    pub fn date(&self) -> InspectionDate {
        InspectionDate(self.0.date_naive())
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl TryFrom<String> for Timestamp {
    type Error = InspError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.to_iso8601()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

/// The date an inspection was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InspectionDate(NaiveDate);

impl InspectionDate {
    /// Today's date in UTC.
    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }

    /// Build a date from year, month and day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, InspError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                InspError::Validation(format!("invalid date {year:04}-{month:02}-{day:02}"))
            })
    }

    /// Parse an ISO `YYYY-MM-DD` date.
    pub fn parse(s: &str) -> Result<Self, InspError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|e| InspError::Validation(format!("invalid ISO date {s:?}: {e}")))
    }

    /// Access the inner `NaiveDate`.
    pub fn as_naive(&self) -> &NaiveDate {
        &self.0
    }
}

impl std::fmt::Display for InspectionDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_now_has_no_subseconds() {
        let ts = Timestamp::now();
        assert_eq!(ts.as_datetime().nanosecond(), 0);
    }

    #[test]
    fn test_from_utc_truncates() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 15, 12, 30, 45).unwrap();
        let dt_with_nanos = dt.with_nanosecond(123_456_789).unwrap();
        let ts = Timestamp::from_utc(dt_with_nanos);
        assert_eq!(ts.as_datetime().nanosecond(), 0);
        assert_eq!(ts.to_iso8601(), "2026-01-15T12:30:45Z");
    }

    #[test]
    fn test_display_matches_iso8601() {
        let dt = Utc.with_ymd_and_hms(2026, 6, 30, 23, 59, 59).unwrap();
        let ts = Timestamp::from_utc(dt);
        assert_eq!(format!("{ts}"), ts.to_iso8601());
    }

    #[test]
    fn test_parse_z_suffix_accepted() {
        let ts = Timestamp::parse("2026-01-15T12:00:00Z").unwrap();
        assert_eq!(ts.to_iso8601(), "2026-01-15T12:00:00Z");
    }

    #[test]
    fn test_parse_offsets_rejected() {
        assert!(Timestamp::parse("2026-01-15T12:00:00+00:00").is_err());
        assert!(Timestamp::parse("2026-01-15T17:00:00+05:00").is_err());
    }

    #[test]
    fn test_parse_fractional_seconds_rejected() {
        assert!(Timestamp::parse("2026-01-15T12:00:00.5Z").is_err());
        assert!(Timestamp::parse("2026-01-15T12:00:00.000000001Z").is_err());
    }

    #[test]
    fn test_parse_invalid_format() {
        assert!(Timestamp::parse("not-a-date").is_err());
        assert!(Timestamp::parse("").is_err());
    }

    #[test]
    fn test_timestamp_date() {
        let ts = Timestamp::parse("2026-03-01T23:59:59Z").unwrap();
        assert_eq!(ts.date().to_string(), "2026-03-01");
    }

    #[test]
    fn test_serde_roundtrip() {
        let ts = Timestamp::parse("2026-01-15T12:00:00Z").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2026-01-15T12:00:00Z\"");
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, parsed);
    }

    #[test]
    fn test_deserialize_uses_strict_parser() {
        for input in [
            "\"2026-10-19T09:00:00.5+05:00\"",
            "\"2026-10-19T09:00:00+00:00\"",
            "\"2026-10-19T09:00:00.500Z\"",
            "\"2026-10-19\"",
        ] {
            assert!(
                serde_json::from_str::<Timestamp>(input).is_err(),
                "accepted {input}"
            );
        }
    }

    // ---- InspectionDate ----

    #[test]
    fn test_date_parse_and_display() {
        let date = InspectionDate::parse("2026-10-19").unwrap();
        assert_eq!(date.to_string(), "2026-10-19");
    }

    #[test]
    fn test_date_parse_rejects_garbage() {
        assert!(InspectionDate::parse("19/10/2026").is_err());
        assert!(InspectionDate::parse("2026-02-30").is_err());
        assert!(InspectionDate::parse("").is_err());
    }

    #[test]
    fn test_date_from_ymd() {
        assert_eq!(
            InspectionDate::from_ymd(2026, 1, 5).unwrap().to_string(),
            "2026-01-05"
        );
        assert!(InspectionDate::from_ymd(2026, 13, 1).is_err());
    }

    #[test]
    fn test_date_serializes_as_iso_string() {
        let date = InspectionDate::from_ymd(2026, 10, 19).unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2026-10-19\"");
        let back: InspectionDate = serde_json::from_str("\"2026-10-19\"").unwrap();
        assert_eq!(back, date);
    }
}
