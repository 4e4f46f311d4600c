use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};
use crate::models::UserId;
use crate::time::{self, TimeOfDay, TimeRange};

/// Shortest slot a customer can book directly.
pub const MIN_BOOKING_MINUTES: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Every status except `Cancelled` holds the painter's time.
    pub fn is_active(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(BookingError::Validation(format!(
                "Unknown booking status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub painter_id: UserId,
    pub customer_id: UserId,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn time_range(&self) -> TimeRange {
        TimeRange {
            start: self.start_time,
            end: self.end_time,
        }
    }

    /// Whether this booking blocks `range` on its own date.
    pub fn conflicts_with(&self, range: &TimeRange) -> bool {
        self.status.is_active() && self.time_range().overlaps(range)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub painter_id: UserId,
    pub customer_id: UserId,
    pub date: NaiveDate,
    pub time_range: TimeRange,
    pub status: BookingStatus,
}

/// Body of a direct booking for a chosen painter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub painter_id: UserId,
    pub customer_id: UserId,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub start_time: String,
    pub end_time: String,
    /// Defaults to pending.
    #[serde(default)]
    pub status: Option<BookingStatus>,
}

impl CreateBookingRequest {
    pub fn validate(&self) -> BookingResult<NewBooking> {
        let date = time::parse_date(&self.date)?;
        let time_range = TimeRange::parse(&self.start_time, &self.end_time)?;
        if time_range.duration_minutes() < MIN_BOOKING_MINUTES {
            return Err(BookingError::Validation(
                "Time slot must be at least 1 hour long".to_string(),
            ));
        }

        Ok(NewBooking {
            painter_id: self.painter_id,
            customer_id: self.customer_id,
            date,
            time_range,
            status: self.status.unwrap_or(BookingStatus::Pending),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}
