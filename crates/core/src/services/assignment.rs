//! # Booking Assignment
//!
//! Turns a customer's booking request into either a confirmed booking with
//! the best free painter, or a list of suggested alternatives.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{error, info, instrument, warn};

use crate::errors::{BookingError, BookingResult};
use crate::models::assignment::{
    AssignedPainter, AssignmentOutcome, BookingAssigned, BookingRequest, NoPainterAvailable,
};
use crate::models::booking::{BookingStatus, NewBooking};
use crate::services::matching::{MatchingEngine, rank_candidates};
use crate::services::recommendation::{DEFAULT_LIMIT, RecommendationEngine};
use crate::store::Stores;
use crate::time::{self, TimeOfDay, TimeRange};

#[derive(Clone)]
pub struct BookingAssignmentService {
    stores: Stores,
    matching: MatchingEngine,
    recommendations: RecommendationEngine,
    recommendation_limit: usize,
}

impl BookingAssignmentService {
    pub fn new(stores: Stores) -> Self {
        Self {
            matching: MatchingEngine::new(stores.clone()),
            recommendations: RecommendationEngine::new(stores.clone()),
            stores,
            recommendation_limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_recommendation_limit(mut self, limit: usize) -> Self {
        self.recommendation_limit = limit;
        self
    }

    /// Books the highest-rated free painter, or explains why none could be.
    ///
    /// Only malformed requests and store failures are errors. When every
    /// candidate is taken, including candidates lost to a concurrent request
    /// between matching and insert, the outcome is
    /// [`AssignmentOutcome::Unavailable`].
    #[instrument(skip(self, request), fields(customer_id = request.customer_id))]
    pub async fn create(&self, request: &BookingRequest) -> BookingResult<AssignmentOutcome> {
        let window = RequestedWindow::parse(request)?;

        let mut candidates = self
            .matching
            .find_available_painters(window.start, window.end)
            .await?;
        rank_candidates(&mut candidates);

        for painter in candidates {
            let booking = NewBooking {
                painter_id: painter.user_id,
                customer_id: request.customer_id,
                date: window.date(),
                time_range: window.range,
                status: BookingStatus::Confirmed,
            };

            match self.stores.bookings.create_booking(booking).await {
                Ok(created) => {
                    info!(
                        booking_id = %created.id,
                        painter_id = painter.user_id,
                        "Booking created for {} on {}",
                        window.range,
                        created.date
                    );
                    return Ok(AssignmentOutcome::Assigned(BookingAssigned {
                        booking_id: created.id,
                        painter: AssignedPainter {
                            id: painter.user_id,
                            name: painter.display_name(),
                        },
                        start_time: request.start_time.clone(),
                        end_time: request.end_time.clone(),
                        status: created.status,
                    }));
                }
                Err(BookingError::Conflict(reason)) => {
                    warn!(painter_id = painter.user_id, "Painter taken concurrently: {}", reason);
                }
                Err(e) => return Err(e),
            }
        }

        let recommendations = match self
            .recommendations
            .find_closest_available_slots(window.date(), window.range, None, self.recommendation_limit)
            .await
        {
            Ok(recommendations) => recommendations,
            Err(e) => {
                error!("Failed to compute recommendations: {}", e);
                Vec::new()
            }
        };

        Ok(AssignmentOutcome::Unavailable(NoPainterAvailable::new(
            recommendations,
        )))
    }
}

/// A validated booking request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestedWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub range: TimeRange,
}

impl RequestedWindow {
    pub fn parse(request: &BookingRequest) -> BookingResult<Self> {
        let start = time::parse_timestamp(&request.start_time);
        let end = time::parse_timestamp(&request.end_time);
        let (Ok(start), Ok(end)) = (start, end) else {
            return Err(BookingError::Validation(
                "Invalid date format for startTime or endTime".to_string(),
            ));
        };
        Self::new(start, end)
    }

    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> BookingResult<Self> {
        if start >= end {
            return Err(BookingError::Validation(
                "startTime must be before endTime".to_string(),
            ));
        }
        if start.date_naive() != end.date_naive() {
            return Err(BookingError::Validation(
                "startTime and endTime must fall on the same day".to_string(),
            ));
        }

        let range = TimeRange::new(TimeOfDay::of(&start), TimeOfDay::of(&end))?;
        Ok(Self { start, end, range })
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date_naive()
    }
}
