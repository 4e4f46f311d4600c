#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use paintbook_core::memory::InMemoryStore;
use paintbook_core::models::UserId;
use paintbook_core::models::availability::{Availability, NewAvailability};
use paintbook_core::models::booking::{Booking, BookingStatus, NewBooking};
use paintbook_core::models::painter::Painter;
use paintbook_core::store::{AvailabilityStore, BookingStore, Stores};
use paintbook_core::time::TimeRange;

/// Monday.
pub const DAY: &str = "2025-06-02";

pub fn ts(value: &str) -> DateTime<Utc> {
    value.parse().expect("Invalid test timestamp")
}

pub fn date(value: &str) -> NaiveDate {
    value.parse().expect("Invalid test date")
}

/// `"HH:MM"` on the given date, as a UTC timestamp.
pub fn at(day: &str, time: &str) -> DateTime<Utc> {
    ts(&format!("{}T{}:00Z", day, time))
}

pub fn range(start: &str, end: &str) -> TimeRange {
    TimeRange::parse(start, end).expect("Invalid test range")
}

pub fn painter(user_id: UserId, name: &str, rating: f64) -> Painter {
    Painter {
        user_id,
        name: Some(name.to_string()),
        rating,
        specialization: "Interior Painting".to_string(),
    }
}

pub struct Fixture {
    pub store: Arc<InMemoryStore>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryStore::new()),
        }
    }

    pub fn stores(&self) -> Stores {
        Stores::from_backend(self.store.clone())
    }

    pub async fn painter(&self, user_id: UserId, name: &str, rating: f64) {
        self.store.insert_painter(painter(user_id, name, rating)).await;
    }

    pub async fn window(&self, painter_id: UserId, day: &str, start: &str, end: &str) -> Availability {
        let availability = NewAvailability::new(painter_id, at(day, start), at(day, end))
            .expect("Invalid test window");
        self.store
            .create_availability(availability)
            .await
            .expect("Failed to create window")
    }

    pub async fn booking(
        &self,
        painter_id: UserId,
        day: &str,
        start: &str,
        end: &str,
        status: BookingStatus,
    ) -> Booking {
        self.store
            .create_booking(NewBooking {
                painter_id,
                customer_id: 100,
                date: date(day),
                time_range: range(start, end),
                status,
            })
            .await
            .expect("Failed to create booking")
    }
}
