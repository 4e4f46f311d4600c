//! # Recommendation Engine
//!
//! Suggests bookable slots close to a request that could not be honoured.
//!
//! The search runs in three tiers and never reorders across them:
//!
//! 1. **Same day**: every window starting on the requested date is probed
//!    for the requested range itself, then for same-length slots on a
//!    30-minute grid before and after it.
//! 2. **Nearby days**: while the quota is not filled, the same-day search is
//!    repeated for each of the following seven days.
//! 3. **Fallback**: when the first two tiers found nothing, whole windows
//!    starting in the following seven days are surfaced verbatim.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use tracing::{debug, instrument};

use crate::errors::{BookingError, BookingResult};
use crate::models::UserId;
use crate::models::availability::Availability;
use crate::models::booking::Booking;
use crate::models::painter::{Painter, fallback_painter_name};
use crate::models::recommendation::{DayOfWeek, RecommendedSlot, SlotReason};
use crate::services::matching::has_conflict;
use crate::store::{PainterDirectory, Stores};
use crate::time::{MINUTES_PER_DAY, TimeRange};

pub const DEFAULT_LIMIT: usize = 5;

const SLOT_STEP_MINUTES: usize = 30;
const MAX_SLOTS_PER_SIDE: usize = 2;
const SEARCH_HORIZON_DAYS: u64 = 7;

#[derive(Clone)]
pub struct RecommendationEngine {
    stores: Stores,
}

impl RecommendationEngine {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Up to `limit` suggestions for `requested` on `date`, best first.
    ///
    /// `painter_id` restricts the same-day and nearby tiers to one painter.
    #[instrument(skip(self, requested), fields(requested = %requested))]
    pub async fn find_closest_available_slots(
        &self,
        date: NaiveDate,
        requested: TimeRange,
        painter_id: Option<UserId>,
        limit: usize,
    ) -> BookingResult<Vec<RecommendedSlot>> {
        if requested.start >= requested.end {
            return Err(BookingError::Validation(format!(
                "Start time {} must be before end time {}",
                requested.start, requested.end
            )));
        }
        if limit == 0 {
            return Ok(Vec::new());
        }

        let windows = self.stores.availability.list_availabilities().await?;
        let mut profiles = ProfileCache::default();

        let mut recommendations = self
            .slots_on_date(&windows, date, &requested, painter_id, &mut profiles)
            .await?;
        debug!(count = recommendations.len(), "Same-day search finished");

        if recommendations.len() < limit {
            for day in following_days(date) {
                let remaining = limit.saturating_sub(recommendations.len());
                if remaining == 0 {
                    break;
                }
                let mut slots = self
                    .slots_on_date(&windows, day, &requested, painter_id, &mut profiles)
                    .await?;
                slots.truncate(remaining);
                recommendations.extend(slots);
            }
            debug!(count = recommendations.len(), "Nearby-day search finished");
        }

        if recommendations.is_empty() {
            recommendations = self
                .fallback_slots(&windows, date, limit, &mut profiles)
                .await?;
            debug!(count = recommendations.len(), "Fallback search finished");
        }

        recommendations.truncate(limit);
        Ok(recommendations)
    }

    /// Exact and alternative slots inside the windows that start on `date`.
    async fn slots_on_date(
        &self,
        windows: &[Availability],
        date: NaiveDate,
        requested: &TimeRange,
        painter_id: Option<UserId>,
        profiles: &mut ProfileCache,
    ) -> BookingResult<Vec<RecommendedSlot>> {
        let mut bookings: HashMap<UserId, Vec<Booking>> = HashMap::new();
        let mut slots = Vec::new();

        let day_windows = windows
            .iter()
            .filter(|window| window.date() == date)
            .filter(|window| painter_id.is_none_or(|id| window.painter_id == id));

        for window in day_windows {
            if !bookings.contains_key(&window.painter_id) {
                let existing = self
                    .stores
                    .bookings
                    .list_active_bookings_on(window.painter_id, date)
                    .await?;
                bookings.insert(window.painter_id, existing);
            }
            let existing = bookings
                .get(&window.painter_id)
                .map(Vec::as_slice)
                .unwrap_or_default();

            let candidates = candidate_slots(&window.time_range(), requested, existing);
            if candidates.is_empty() {
                continue;
            }

            let painter = profiles
                .resolve(self.stores.painters.as_ref(), window.painter_id)
                .await?;
            for slot in candidates {
                slots.push(recommended_slot(
                    window.painter_id,
                    painter,
                    date,
                    slot,
                    SlotReason::classify(requested, &slot),
                    requested.start.abs_diff(slot.start),
                ));
            }
        }

        rank_same_day(&mut slots);
        Ok(slots)
    }

    /// Whole windows from the following days, ignoring bookings and any
    /// painter filter.
    async fn fallback_slots(
        &self,
        windows: &[Availability],
        date: NaiveDate,
        limit: usize,
        profiles: &mut ProfileCache,
    ) -> BookingResult<Vec<RecommendedSlot>> {
        let mut slots = Vec::new();

        for (offset, day) in (1..).zip(following_days(date)) {
            let remaining = limit.saturating_sub(slots.len());
            if remaining == 0 {
                break;
            }

            let day_windows: Vec<&Availability> = windows
                .iter()
                .filter(|window| window.date() == day)
                .take(remaining)
                .collect();

            for window in day_windows {
                let painter = profiles
                    .resolve(self.stores.painters.as_ref(), window.painter_id)
                    .await?;
                slots.push(recommended_slot(
                    window.painter_id,
                    painter,
                    day,
                    window.time_range(),
                    SlotReason::Alternative,
                    offset * MINUTES_PER_DAY,
                ));
            }
        }

        rank_by_rating(&mut slots);
        Ok(slots)
    }
}

/// Slots for `requested` inside one window, given the painter's active
/// bookings on that day.
///
/// Returns the requested range alone when it fits and is free. Otherwise
/// probes same-length slots every 30 minutes: up to two from the window
/// start through the requested start, then up to two from the requested end
/// (never before the window start) while the slot still ends inside the
/// window.
pub fn candidate_slots(window: &TimeRange, requested: &TimeRange, bookings: &[Booking]) -> Vec<TimeRange> {
    if window.contains(requested) && !has_conflict(bookings, requested) {
        return vec![*requested];
    }

    let duration = requested.duration_minutes();
    let (window_start, window_end) = (window.start.minutes(), window.end.minutes());
    let fits = |start: &u32| start + duration <= window_end;
    let slot_at = |start: u32| TimeRange::from_minutes(start, start + duration);
    let is_free = |slot: &TimeRange| !has_conflict(bookings, slot);

    let earlier = (window_start..=requested.start.minutes())
        .step_by(SLOT_STEP_MINUTES)
        .filter(fits)
        .map(slot_at)
        .filter(is_free)
        .take(MAX_SLOTS_PER_SIDE);

    let later = (requested.end.minutes().max(window_start)..)
        .step_by(SLOT_STEP_MINUTES)
        .take_while(fits)
        .map(slot_at)
        .filter(is_free)
        .take(MAX_SLOTS_PER_SIDE);

    earlier.chain(later).collect()
}

/// Exact matches first, then rating descending, then distance ascending.
fn rank_same_day(slots: &mut [RecommendedSlot]) {
    slots.sort_by(|a, b| {
        let a_exact = a.reason == SlotReason::ExactMatch;
        let b_exact = b.reason == SlotReason::ExactMatch;
        b_exact
            .cmp(&a_exact)
            .then_with(|| b.painter_rating.total_cmp(&a.painter_rating))
            .then_with(|| a.time_difference.cmp(&b.time_difference))
    });
}

fn rank_by_rating(slots: &mut [RecommendedSlot]) {
    slots.sort_by(|a, b| {
        b.painter_rating
            .total_cmp(&a.painter_rating)
            .then_with(|| a.time_difference.cmp(&b.time_difference))
    });
}

fn following_days(date: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    (1..=SEARCH_HORIZON_DAYS).map_while(move |offset| date.checked_add_days(Days::new(offset)))
}

fn recommended_slot(
    painter_id: UserId,
    painter: Option<&Painter>,
    date: NaiveDate,
    slot: TimeRange,
    reason: SlotReason,
    time_difference: u32,
) -> RecommendedSlot {
    RecommendedSlot {
        painter_id,
        painter_name: painter
            .map(Painter::display_name)
            .unwrap_or_else(|| fallback_painter_name(painter_id)),
        date,
        start_time: slot.start,
        end_time: slot.end,
        day_of_week: DayOfWeek::of(date),
        reason,
        time_difference,
        painter_rating: painter.map_or(0.0, |painter| painter.rating),
    }
}

/// Painter lookups memoised for the duration of one search.
#[derive(Default)]
struct ProfileCache {
    profiles: HashMap<UserId, Option<Painter>>,
}

impl ProfileCache {
    async fn resolve(
        &mut self,
        directory: &dyn PainterDirectory,
        user_id: UserId,
    ) -> BookingResult<Option<&Painter>> {
        if !self.profiles.contains_key(&user_id) {
            let painter = directory.find_painter_by_user_id(user_id).await?;
            if painter.is_none() {
                debug!(painter_id = user_id, "No painter profile, using defaults");
            }
            self.profiles.insert(user_id, painter);
        }
        Ok(self.profiles.get(&user_id).and_then(Option::as_ref))
    }
}
