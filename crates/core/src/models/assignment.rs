use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::UserId;
use crate::models::booking::BookingStatus;
use crate::models::recommendation::RecommendedSlot;

pub const NO_PAINTERS_AVAILABLE: &str = "No painters are available for the requested time slot.";

/// Body of `POST /api/booking-request`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub start_time: String,
    pub end_time: String,
    pub customer_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedPainter {
    pub id: UserId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingAssigned {
    pub booking_id: Uuid,
    pub painter: AssignedPainter,
    pub start_time: String,
    pub end_time: String,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoPainterAvailable {
    pub error: String,
    pub recommendations: Vec<RecommendedSlot>,
}

impl NoPainterAvailable {
    pub fn new(recommendations: Vec<RecommendedSlot>) -> Self {
        Self {
            error: NO_PAINTERS_AVAILABLE.to_string(),
            recommendations,
        }
    }
}

/// Terminal state of a booking request. Serialized without a tag, so the two
/// payloads are told apart by shape (`bookingId` versus `error`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssignmentOutcome {
    Assigned(BookingAssigned),
    Unavailable(NoPainterAvailable),
}

impl AssignmentOutcome {
    pub fn is_assigned(&self) -> bool {
        matches!(self, AssignmentOutcome::Assigned(_))
    }
}
