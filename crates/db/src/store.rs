//! PostgreSQL implementation of the core store traits.

use async_trait::async_trait;
use chrono::NaiveDate;
use paintbook_core::errors::{BookingError, BookingResult};
use paintbook_core::models::UserId;
use paintbook_core::models::availability::{Availability, AvailabilityChanges, NewAvailability};
use paintbook_core::models::booking::{Booking, BookingStatus, NewBooking};
use paintbook_core::models::painter::{Painter, PainterFilter};
use paintbook_core::store::{AvailabilityStore, BookingStore, PainterDirectory};
use uuid::Uuid;

use crate::DbPool;
use crate::error::{BookingOverlap, MissingReference};
use crate::models::DbBooking;
use crate::repositories::{availability, booking, painter};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Repository failures become `Database` errors, except overlaps, which
/// surface as `Conflict`, and dangling user ids, which are `Validation`.
/// Domain errors raised inside a repository pass through unchanged.
pub fn into_booking_error(report: eyre::Report) -> BookingError {
    let report = match report.downcast::<BookingError>() {
        Ok(error) => return error,
        Err(report) => report,
    };
    let report = match report.downcast::<BookingOverlap>() {
        Ok(overlap) => return BookingError::Conflict(overlap.0),
        Err(report) => report,
    };
    match report.downcast::<MissingReference>() {
        Ok(missing) => BookingError::Validation(missing.0),
        Err(report) => BookingError::Database(report),
    }
}

fn into_bookings(rows: Vec<DbBooking>) -> BookingResult<Vec<Booking>> {
    rows.into_iter().map(Booking::try_from).collect()
}

#[async_trait]
impl AvailabilityStore for PgStore {
    async fn list_availabilities(&self) -> BookingResult<Vec<Availability>> {
        let rows = availability::get_all_availabilities(&self.pool).await?;
        Ok(rows.into_iter().map(Availability::from).collect())
    }

    async fn list_availabilities_by_painter(&self, painter_id: UserId) -> BookingResult<Vec<Availability>> {
        let rows = availability::get_availabilities_by_painter(&self.pool, painter_id).await?;
        Ok(rows.into_iter().map(Availability::from).collect())
    }

    async fn get_availability(&self, id: Uuid) -> BookingResult<Option<Availability>> {
        let row = availability::get_availability_by_id(&self.pool, id).await?;
        Ok(row.map(Availability::from))
    }

    async fn create_availability(&self, new: NewAvailability) -> BookingResult<Availability> {
        let row =
            availability::create_availability(&self.pool, new.painter_id, new.start_time, new.end_time)
                .await?;
        Ok(row.into())
    }

    async fn update_availability(
        &self,
        id: Uuid,
        changes: AvailabilityChanges,
    ) -> BookingResult<Option<Availability>> {
        let row = availability::update_availability(&self.pool, id, &changes)
            .await
            .map_err(into_booking_error)?;
        Ok(row.map(Availability::from))
    }

    async fn delete_availability(&self, id: Uuid) -> BookingResult<bool> {
        Ok(availability::delete_availability(&self.pool, id).await?)
    }

    async fn delete_availabilities_by_painter(&self, painter_id: UserId) -> BookingResult<u64> {
        Ok(availability::delete_availabilities_by_painter(&self.pool, painter_id).await?)
    }
}

#[async_trait]
impl BookingStore for PgStore {
    async fn list_bookings(&self) -> BookingResult<Vec<Booking>> {
        into_bookings(booking::get_all_bookings(&self.pool).await?)
    }

    async fn get_booking(&self, id: Uuid) -> BookingResult<Option<Booking>> {
        booking::get_booking_by_id(&self.pool, id)
            .await?
            .map(Booking::try_from)
            .transpose()
    }

    async fn list_bookings_by_painter(&self, painter_id: UserId) -> BookingResult<Vec<Booking>> {
        into_bookings(booking::get_bookings_by_painter(&self.pool, painter_id).await?)
    }

    async fn list_bookings_by_customer(&self, customer_id: UserId) -> BookingResult<Vec<Booking>> {
        into_bookings(booking::get_bookings_by_customer(&self.pool, customer_id).await?)
    }

    async fn list_active_bookings_on(&self, painter_id: UserId, date: NaiveDate) -> BookingResult<Vec<Booking>> {
        into_bookings(booking::get_active_bookings_on(&self.pool, painter_id, date).await?)
    }

    async fn create_booking(&self, new: NewBooking) -> BookingResult<Booking> {
        let row = booking::create_booking(
            &self.pool,
            new.painter_id,
            new.customer_id,
            new.date,
            new.time_range.start.to_naive_time(),
            new.time_range.end.to_naive_time(),
            new.status,
        )
        .await
        .map_err(into_booking_error)?;

        row.try_into()
    }

    async fn update_booking_status(&self, id: Uuid, status: BookingStatus) -> BookingResult<Option<Booking>> {
        booking::update_booking_status(&self.pool, id, status)
            .await
            .map_err(into_booking_error)?
            .map(Booking::try_from)
            .transpose()
    }

    async fn delete_booking(&self, id: Uuid) -> BookingResult<bool> {
        Ok(booking::delete_booking(&self.pool, id).await?)
    }
}

#[async_trait]
impl PainterDirectory for PgStore {
    async fn find_painter_by_user_id(&self, user_id: UserId) -> BookingResult<Option<Painter>> {
        let row = painter::get_painter_by_user_id(&self.pool, user_id).await?;
        Ok(row.map(Painter::from))
    }

    async fn list_painters(&self, filter: PainterFilter) -> BookingResult<Vec<Painter>> {
        let rows = painter::get_painters(&self.pool, filter.specialization.as_deref()).await?;
        Ok(rows.into_iter().map(Painter::from).collect())
    }
}
