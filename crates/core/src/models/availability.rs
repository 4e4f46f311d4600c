use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};
use crate::models::UserId;
use crate::time::{self, TimeOfDay, TimeRange};

/// A contiguous range during which a painter can be booked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub id: Uuid,
    pub painter_id: UserId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Availability {
    /// Calendar date the window starts on.
    pub fn date(&self) -> NaiveDate {
        self.start_time.date_naive()
    }

    /// Full-timestamp containment of `[start, end)` in this window.
    pub fn covers(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        time::contains(self.start_time, self.end_time, start, end)
    }

    /// Time-of-day view of the window. Inverted when the window crosses midnight.
    pub fn time_range(&self) -> TimeRange {
        TimeRange {
            start: TimeOfDay::of(&self.start_time),
            end: TimeOfDay::of(&self.end_time),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAvailability {
    pub painter_id: UserId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl NewAvailability {
    pub fn new(painter_id: UserId, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> BookingResult<Self> {
        if start_time >= end_time {
            return Err(BookingError::Validation(
                "startTime must be before endTime".to_string(),
            ));
        }
        Ok(Self {
            painter_id,
            start_time,
            end_time,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAvailabilityRequest {
    pub painter_id: UserId,
    pub start_time: String,
    pub end_time: String,
}

impl CreateAvailabilityRequest {
    pub fn validate(&self) -> BookingResult<NewAvailability> {
        let start = time::parse_timestamp(&self.start_time);
        let end = time::parse_timestamp(&self.end_time);
        let (Ok(start), Ok(end)) = (start, end) else {
            return Err(BookingError::Validation(
                "Invalid date format for startTime or endTime".to_string(),
            ));
        };
        NewAvailability::new(self.painter_id, start, end)
    }
}

/// A partial edit of a window. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailabilityChanges {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl AvailabilityChanges {
    /// The window `current` becomes once these changes are applied.
    pub fn apply(&self, current: &Availability) -> BookingResult<NewAvailability> {
        NewAvailability::new(
            current.painter_id,
            self.start_time.unwrap_or(current.start_time),
            self.end_time.unwrap_or(current.end_time),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAvailabilityRequest {
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl UpdateAvailabilityRequest {
    pub fn validate(&self) -> BookingResult<AvailabilityChanges> {
        if self.start_time.is_none() && self.end_time.is_none() {
            return Err(BookingError::Validation(
                "Nothing to update: provide startTime or endTime".to_string(),
            ));
        }

        let parse = |value: &Option<String>| -> BookingResult<Option<DateTime<Utc>>> {
            value
                .as_deref()
                .map(time::parse_timestamp)
                .transpose()
                .map_err(|_| {
                    BookingError::Validation("Invalid date format for startTime or endTime".to_string())
                })
        };

        Ok(AvailabilityChanges {
            start_time: parse(&self.start_time)?,
            end_time: parse(&self.end_time)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub id: Uuid,
    pub painter_id: UserId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl From<Availability> for AvailabilityResponse {
    fn from(availability: Availability) -> Self {
        Self {
            id: availability.id,
            painter_id: availability.painter_id,
            start_time: availability.start_time,
            end_time: availability.end_time,
        }
    }
}
