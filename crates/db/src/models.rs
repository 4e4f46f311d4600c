use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use paintbook_core::errors::BookingError;
use paintbook_core::models::availability::Availability;
use paintbook_core::models::booking::Booking;
use paintbook_core::models::painter::Painter;
use paintbook_core::time::TimeOfDay;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// A painter profile joined with its user row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPainter {
    pub user_id: i64,
    pub name: Option<String>,
    pub rating: f64,
    pub specialization: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAvailability {
    pub id: Uuid,
    pub painter_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub painter_id: i64,
    pub customer_id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbPainter> for Painter {
    fn from(row: DbPainter) -> Self {
        Self {
            user_id: row.user_id,
            name: row.name,
            rating: row.rating,
            specialization: row.specialization,
        }
    }
}

impl From<DbAvailability> for Availability {
    fn from(row: DbAvailability) -> Self {
        Self {
            id: row.id,
            painter_id: row.painter_id,
            start_time: row.start_time,
            end_time: row.end_time,
            created_at: row.created_at,
        }
    }
}

impl TryFrom<DbBooking> for Booking {
    type Error = BookingError;

    fn try_from(row: DbBooking) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            painter_id: row.painter_id,
            customer_id: row.customer_id,
            date: row.date,
            start_time: TimeOfDay::of(&row.start_time),
            end_time: TimeOfDay::of(&row.end_time),
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
