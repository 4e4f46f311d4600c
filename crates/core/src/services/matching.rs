//! # Matching Engine
//!
//! Finds the painters who can take a requested interval as-is.
//!
//! A painter is eligible when one of their availability windows contains the
//! requested interval and none of their active bookings on the requested date
//! overlaps the requested time of day.
//!
//! Containment compares full timestamps while the conflict check compares
//! time of day on the start date only. A request spanning two calendar dates
//! is therefore checked against the start date's bookings alone; the booking
//! flow rejects such requests before they reach this engine.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};

use crate::errors::BookingResult;
use crate::models::booking::Booking;
use crate::models::painter::Painter;
use crate::store::Stores;
use crate::time::{TimeOfDay, TimeRange};

#[derive(Clone)]
pub struct MatchingEngine {
    stores: Stores,
}

impl MatchingEngine {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Eligible painters in availability order, each listed once.
    #[instrument(skip(self))]
    pub async fn find_available_painters(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> BookingResult<Vec<Painter>> {
        let date = start.date_naive();
        let requested = TimeRange {
            start: TimeOfDay::of(&start),
            end: TimeOfDay::of(&end),
        };

        let windows = self.stores.availability.list_availabilities().await?;
        let mut checked = HashSet::new();
        let mut eligible = Vec::new();

        for window in windows.iter().filter(|window| window.covers(start, end)) {
            if !checked.insert(window.painter_id) {
                continue;
            }

            let bookings = self
                .stores
                .bookings
                .list_active_bookings_on(window.painter_id, date)
                .await?;
            if has_conflict(&bookings, &requested) {
                debug!(painter_id = window.painter_id, "Painter already booked for {}", requested);
                continue;
            }

            match self.stores.painters.find_painter_by_user_id(window.painter_id).await? {
                Some(painter) => eligible.push(painter),
                None => warn!(
                    painter_id = window.painter_id,
                    "Skipping painter without a painter profile"
                ),
            }
        }

        debug!(count = eligible.len(), "Matching finished");
        Ok(eligible)
    }
}

/// Whether any active booking in `bookings` overlaps `range`.
pub fn has_conflict(bookings: &[Booking], range: &TimeRange) -> bool {
    bookings.iter().any(|booking| booking.conflicts_with(range))
}

/// Orders candidates best first: rating descending, then lowest user id.
pub fn rank_candidates(painters: &mut [Painter]) {
    painters.sort_by(|a, b| {
        b.rating
            .total_cmp(&a.rating)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
}

pub fn select_best(mut painters: Vec<Painter>) -> Option<Painter> {
    rank_candidates(&mut painters);
    painters.into_iter().next()
}
