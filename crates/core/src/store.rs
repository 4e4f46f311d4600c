//! # Storage Traits
//!
//! Collaborator interfaces the engines are written against. The PostgreSQL
//! backend lives in `paintbook-db`; [`crate::memory::InMemoryStore`] backs
//! tests and local runs.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::BookingResult;
use crate::models::UserId;
use crate::models::availability::{Availability, AvailabilityChanges, NewAvailability};
use crate::models::booking::{Booking, BookingStatus, NewBooking};
use crate::models::painter::{Painter, PainterFilter};

#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    /// Every window, ordered by start time.
    async fn list_availabilities(&self) -> BookingResult<Vec<Availability>>;

    async fn list_availabilities_by_painter(&self, painter_id: UserId) -> BookingResult<Vec<Availability>>;

    async fn get_availability(&self, id: Uuid) -> BookingResult<Option<Availability>>;

    async fn create_availability(&self, availability: NewAvailability) -> BookingResult<Availability>;

    /// Applies `changes` as one read-modify-write. `Ok(None)` when the id is
    /// unknown; an edit leaving `start >= end` is a validation error.
    async fn update_availability(
        &self,
        id: Uuid,
        changes: AvailabilityChanges,
    ) -> BookingResult<Option<Availability>>;

    /// Returns false when no window had that id.
    async fn delete_availability(&self, id: Uuid) -> BookingResult<bool>;

    /// Returns the number of windows removed.
    async fn delete_availabilities_by_painter(&self, painter_id: UserId) -> BookingResult<u64>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn list_bookings(&self) -> BookingResult<Vec<Booking>>;

    async fn get_booking(&self, id: Uuid) -> BookingResult<Option<Booking>>;

    async fn list_bookings_by_painter(&self, painter_id: UserId) -> BookingResult<Vec<Booking>>;

    async fn list_bookings_by_customer(&self, customer_id: UserId) -> BookingResult<Vec<Booking>>;

    /// Non-cancelled bookings of one painter on one date.
    async fn list_active_bookings_on(&self, painter_id: UserId, date: NaiveDate) -> BookingResult<Vec<Booking>>;

    /// Inserts a booking.
    ///
    /// Implementations must make the overlap check and the insert atomic: an
    /// active booking overlapping another active booking of the same painter
    /// on the same date fails with [`crate::errors::BookingError::Conflict`].
    async fn create_booking(&self, booking: NewBooking) -> BookingResult<Booking>;

    /// Same overlap rule as [`BookingStore::create_booking`] when a booking is
    /// moved back to an active status. `Ok(None)` when the id is unknown.
    async fn update_booking_status(&self, id: Uuid, status: BookingStatus) -> BookingResult<Option<Booking>>;

    /// Returns false when no booking had that id.
    async fn delete_booking(&self, id: Uuid) -> BookingResult<bool>;
}

#[async_trait]
pub trait PainterDirectory: Send + Sync {
    /// `Ok(None)` when the user has no painter profile.
    async fn find_painter_by_user_id(&self, user_id: UserId) -> BookingResult<Option<Painter>>;

    /// Painters passing `filter`, ordered by user id.
    async fn list_painters(&self, filter: PainterFilter) -> BookingResult<Vec<Painter>>;
}

/// The collaborators a booking flow needs, shared behind trait objects.
#[derive(Clone)]
pub struct Stores {
    pub availability: Arc<dyn AvailabilityStore>,
    pub bookings: Arc<dyn BookingStore>,
    pub painters: Arc<dyn PainterDirectory>,
}

impl Stores {
    pub fn new(
        availability: Arc<dyn AvailabilityStore>,
        bookings: Arc<dyn BookingStore>,
        painters: Arc<dyn PainterDirectory>,
    ) -> Self {
        Self {
            availability,
            bookings,
            painters,
        }
    }

    /// All three roles served by one backend.
    pub fn from_backend<S>(backend: Arc<S>) -> Self
    where
        S: AvailabilityStore + BookingStore + PainterDirectory + 'static,
    {
        Self {
            availability: backend.clone(),
            bookings: backend.clone(),
            painters: backend,
        }
    }
}
