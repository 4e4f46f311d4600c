//! # Direct Booking
//!
//! Books a customer-chosen painter for a slot. Unlike the assignment flow
//! there is no fallback: a slot outside the painter's windows is a
//! validation error, and an overlap with an active booking is a conflict.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use tracing::{info, instrument};

use crate::errors::{BookingError, BookingResult};
use crate::models::availability::Availability;
use crate::models::booking::{Booking, CreateBookingRequest, NewBooking};
use crate::store::Stores;
use crate::time;

#[derive(Clone)]
pub struct BookingService {
    stores: Stores,
}

impl BookingService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Validates and persists a direct booking.
    ///
    /// The overlap check is left to [`crate::store::BookingStore::create_booking`],
    /// which performs it atomically with the insert.
    #[instrument(skip(self, request), fields(painter_id = request.painter_id, customer_id = request.customer_id))]
    pub async fn create(&self, request: &CreateBookingRequest) -> BookingResult<Booking> {
        let booking = request.validate()?;

        if self
            .stores
            .painters
            .find_painter_by_user_id(booking.painter_id)
            .await?
            .is_none()
        {
            return Err(BookingError::NotFound(format!(
                "Painter with ID {} not found",
                booking.painter_id
            )));
        }

        let windows = self
            .stores
            .availability
            .list_availabilities_by_painter(booking.painter_id)
            .await?;
        check_within_availability(&windows, &booking)?;

        let created = self.stores.bookings.create_booking(booking).await?;
        info!(
            booking_id = %created.id,
            "Direct booking created for {} on {}",
            created.time_range(),
            created.date
        );
        Ok(created)
    }
}

/// Ok when one of `windows` covers the whole booking.
pub fn check_within_availability(windows: &[Availability], booking: &NewBooking) -> BookingResult<()> {
    let (day_start, day_end) = day_bounds(booking.date)?;
    let on_day: Vec<&Availability> = windows
        .iter()
        .filter(|window| time::overlaps(window.start_time, window.end_time, day_start, day_end))
        .collect();

    if on_day.is_empty() {
        return Err(BookingError::Validation(format!(
            "Painter {} is not available on {}",
            booking.painter_id, booking.date
        )));
    }

    let start = at(booking.date, booking.time_range.start.to_naive_time());
    let end = at(booking.date, booking.time_range.end.to_naive_time());
    if !on_day.iter().any(|window| window.covers(start, end)) {
        return Err(BookingError::Validation(
            "Requested time slot is outside painter's availability".to_string(),
        ));
    }

    Ok(())
}

fn at(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    date.and_time(time).and_utc()
}

fn day_bounds(date: NaiveDate) -> BookingResult<(DateTime<Utc>, DateTime<Utc>)> {
    let next = date
        .checked_add_days(Days::new(1))
        .ok_or_else(|| BookingError::Validation(format!("Date {} is out of range", date)))?;
    Ok((at(date, NaiveTime::MIN), at(next, NaiveTime::MIN)))
}
