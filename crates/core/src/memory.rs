use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};
use crate::models::UserId;
use crate::models::availability::{Availability, AvailabilityChanges, NewAvailability};
use crate::models::booking::{Booking, BookingStatus, NewBooking};
use crate::models::painter::{Painter, PainterFilter};
use crate::store::{AvailabilityStore, BookingStore, PainterDirectory};

/// Process-local backend for all three collaborator roles.
///
/// Booking writes take the bookings lock once for both the overlap check and
/// the insert, which gives the same guarantee as the database constraint.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    availabilities: RwLock<Vec<Availability>>,
    bookings: RwLock<Vec<Booking>>,
    painters: RwLock<HashMap<UserId, Painter>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_painter(&self, painter: Painter) {
        self.painters.write().await.insert(painter.user_id, painter);
    }
}

fn find_overlap<'a>(bookings: &'a [Booking], candidate: &NewBooking, ignore: Option<Uuid>) -> Option<&'a Booking> {
    bookings.iter().find(|existing| {
        Some(existing.id) != ignore
            && existing.painter_id == candidate.painter_id
            && existing.date == candidate.date
            && existing.conflicts_with(&candidate.time_range)
    })
}

fn overlap_error(existing: &Booking) -> BookingError {
    BookingError::Conflict(format!(
        "Painter {} is already booked on {} from {} to {}",
        existing.painter_id, existing.date, existing.start_time, existing.end_time
    ))
}

#[async_trait]
impl AvailabilityStore for InMemoryStore {
    async fn list_availabilities(&self) -> BookingResult<Vec<Availability>> {
        let mut availabilities = self.availabilities.read().await.clone();
        availabilities.sort_by_key(|availability| {
            (availability.start_time, availability.created_at, availability.id)
        });
        Ok(availabilities)
    }

    async fn list_availabilities_by_painter(&self, painter_id: UserId) -> BookingResult<Vec<Availability>> {
        let availabilities = self.list_availabilities().await?;
        Ok(availabilities
            .into_iter()
            .filter(|availability| availability.painter_id == painter_id)
            .collect())
    }

    async fn get_availability(&self, id: Uuid) -> BookingResult<Option<Availability>> {
        let availabilities = self.availabilities.read().await;
        Ok(availabilities.iter().find(|availability| availability.id == id).cloned())
    }

    async fn create_availability(&self, availability: NewAvailability) -> BookingResult<Availability> {
        let created = Availability {
            id: Uuid::new_v4(),
            painter_id: availability.painter_id,
            start_time: availability.start_time,
            end_time: availability.end_time,
            created_at: Utc::now(),
        };
        self.availabilities.write().await.push(created.clone());
        Ok(created)
    }

    async fn update_availability(
        &self,
        id: Uuid,
        changes: AvailabilityChanges,
    ) -> BookingResult<Option<Availability>> {
        let mut availabilities = self.availabilities.write().await;
        let Some(current) = availabilities.iter_mut().find(|availability| availability.id == id) else {
            return Ok(None);
        };

        let updated = changes.apply(current)?;
        current.start_time = updated.start_time;
        current.end_time = updated.end_time;
        Ok(Some(current.clone()))
    }

    async fn delete_availability(&self, id: Uuid) -> BookingResult<bool> {
        let mut availabilities = self.availabilities.write().await;
        let before = availabilities.len();
        availabilities.retain(|availability| availability.id != id);
        Ok(availabilities.len() != before)
    }

    async fn delete_availabilities_by_painter(&self, painter_id: UserId) -> BookingResult<u64> {
        let mut availabilities = self.availabilities.write().await;
        let before = availabilities.len();
        availabilities.retain(|availability| availability.painter_id != painter_id);
        Ok((before - availabilities.len()) as u64)
    }
}

#[async_trait]
impl BookingStore for InMemoryStore {
    async fn list_bookings(&self) -> BookingResult<Vec<Booking>> {
        Ok(self.bookings.read().await.clone())
    }

    async fn get_booking(&self, id: Uuid) -> BookingResult<Option<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.iter().find(|booking| booking.id == id).cloned())
    }

    async fn list_bookings_by_painter(&self, painter_id: UserId) -> BookingResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .iter()
            .filter(|booking| booking.painter_id == painter_id)
            .cloned()
            .collect())
    }

    async fn list_bookings_by_customer(&self, customer_id: UserId) -> BookingResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .iter()
            .filter(|booking| booking.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn list_active_bookings_on(&self, painter_id: UserId, date: NaiveDate) -> BookingResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        let mut active: Vec<Booking> = bookings
            .iter()
            .filter(|booking| {
                booking.painter_id == painter_id && booking.date == date && booking.status.is_active()
            })
            .cloned()
            .collect();
        active.sort_by_key(|booking| booking.start_time);
        Ok(active)
    }

    async fn create_booking(&self, booking: NewBooking) -> BookingResult<Booking> {
        let mut bookings = self.bookings.write().await;

        if booking.status.is_active() {
            if let Some(existing) = find_overlap(&bookings, &booking, None) {
                return Err(overlap_error(existing));
            }
        }

        let now = Utc::now();
        let created = Booking {
            id: Uuid::new_v4(),
            painter_id: booking.painter_id,
            customer_id: booking.customer_id,
            date: booking.date,
            start_time: booking.time_range.start,
            end_time: booking.time_range.end,
            status: booking.status,
            created_at: now,
            updated_at: now,
        };
        bookings.push(created.clone());
        Ok(created)
    }

    async fn update_booking_status(&self, id: Uuid, status: BookingStatus) -> BookingResult<Option<Booking>> {
        let mut bookings = self.bookings.write().await;
        let Some(index) = bookings.iter().position(|booking| booking.id == id) else {
            return Ok(None);
        };

        if status.is_active() && !bookings[index].status.is_active() {
            let current = &bookings[index];
            let candidate = NewBooking {
                painter_id: current.painter_id,
                customer_id: current.customer_id,
                date: current.date,
                time_range: current.time_range(),
                status,
            };
            if let Some(existing) = find_overlap(&bookings, &candidate, Some(id)) {
                return Err(overlap_error(existing));
            }
        }

        let booking = &mut bookings[index];
        booking.status = status;
        booking.updated_at = Utc::now();
        Ok(Some(booking.clone()))
    }

    async fn delete_booking(&self, id: Uuid) -> BookingResult<bool> {
        let mut bookings = self.bookings.write().await;
        let before = bookings.len();
        bookings.retain(|booking| booking.id != id);
        Ok(bookings.len() != before)
    }
}

#[async_trait]
impl PainterDirectory for InMemoryStore {
    async fn find_painter_by_user_id(&self, user_id: UserId) -> BookingResult<Option<Painter>> {
        Ok(self.painters.read().await.get(&user_id).cloned())
    }

    async fn list_painters(&self, filter: PainterFilter) -> BookingResult<Vec<Painter>> {
        let mut painters: Vec<Painter> = self
            .painters
            .read()
            .await
            .values()
            .filter(|painter| filter.matches(painter))
            .cloned()
            .collect();
        painters.sort_by_key(|painter| painter.user_id);
        Ok(painters)
    }
}
