//! # Time-Interval Utilities
//!
//! Wall-clock helpers shared by the matching and recommendation engines.
//!
//! Bookings store their range as a time of day (`"HH:MM"`) next to a calendar
//! date, while availability windows are full UTC timestamps. [`TimeOfDay`]
//! bridges the two: it is minutes since midnight, always in `0..1440`.
//!
//! All ranges are half-open: `[start, end)`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{BookingError, BookingResult};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock time with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    /// Builds a time from a minute count, wrapping modulo one day.
    pub fn from_minutes(minutes: i64) -> Self {
        Self(minutes.rem_euclid(i64::from(MINUTES_PER_DAY)) as u32)
    }

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self(hour * 60 + minute))
    }

    /// Time of day of any chrono value carrying a clock time. Seconds are dropped.
    pub fn of<T: Timelike>(value: &T) -> Self {
        Self(value.hour() * 60 + value.minute())
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    pub fn minute(self) -> u32 {
        self.0 % 60
    }

    /// Absolute distance in minutes, without wrapping around midnight.
    pub fn abs_diff(self, other: Self) -> u32 {
        self.0.abs_diff(other.0)
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0).unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time(s).map(Self)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Parses `"HH:MM"` into minutes since midnight.
///
/// A trailing `":SS"` component is accepted and ignored, since SQL `TIME`
/// values render that way.
pub fn parse_time(value: &str) -> BookingResult<u32> {
    let invalid = || BookingError::Validation(format!("Invalid time '{}': expected HH:MM", value));

    let mut parts = value.trim().split(':');
    let hour = parts.next().ok_or_else(invalid)?;
    let minute = parts.next().ok_or_else(invalid)?;
    let second = parts.next();
    if parts.next().is_some() {
        return Err(invalid());
    }

    let component = |part: &str, max: u32| -> BookingResult<u32> {
        if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let number: u32 = part.parse().map_err(|_| invalid())?;
        if number > max {
            return Err(invalid());
        }
        Ok(number)
    };

    let hour = component(hour, 23)?;
    let minute = component(minute, 59)?;
    if let Some(second) = second {
        component(second, 59)?;
    }

    Ok(hour * 60 + minute)
}

/// Formats a minute count as zero-padded `"HH:MM"`, wrapping modulo one day.
pub fn format_time(minutes: i64) -> String {
    TimeOfDay::from_minutes(minutes).to_string()
}

/// Half-open overlap: `[s1, e1)` and `[s2, e2)` share at least one instant.
pub fn overlaps<T: PartialOrd>(s1: T, e1: T, s2: T, e2: T) -> bool {
    s1 < e2 && e1 > s2
}

/// `[outer_start, outer_end)` fully covers `[inner_start, inner_end)`.
pub fn contains<T: PartialOrd>(outer_start: T, outer_end: T, inner_start: T, inner_end: T) -> bool {
    outer_start <= inner_start && inner_end <= outer_end
}

/// A half-open time-of-day range on a single day.
///
/// Built through [`TimeRange::new`] the range is guaranteed non-empty. Ranges
/// read back from availability windows that cross midnight may be inverted;
/// such a range contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeRange {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> BookingResult<Self> {
        if start >= end {
            return Err(BookingError::Validation(format!(
                "Start time {} must be before end time {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> BookingResult<Self> {
        Self::new(start.parse()?, end.parse()?)
    }

    pub(crate) fn from_minutes(start: u32, end: u32) -> Self {
        Self {
            start: TimeOfDay::from_minutes(i64::from(start)),
            end: TimeOfDay::from_minutes(i64::from(end)),
        }
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }

    pub fn contains(&self, other: &TimeRange) -> bool {
        self.start < self.end && contains(self.start, self.end, other.start, other.end)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

const NAIVE_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses an RFC 3339 timestamp. Timestamps without an offset are taken as UTC.
pub fn parse_timestamp(value: &str) -> BookingResult<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| BookingError::Validation(format!("Invalid timestamp '{}'", value)))
}

pub fn parse_date(value: &str) -> BookingResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        BookingError::Validation(format!("Invalid date '{}': expected YYYY-MM-DD", value))
    })
}
