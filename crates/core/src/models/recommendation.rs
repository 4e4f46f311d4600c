use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::UserId;
use crate::time::{TimeOfDay, TimeRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl DayOfWeek {
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }
}

/// Why a slot was suggested, bucketed by its distance from the requested start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotReason {
    #[serde(rename = "Exact time slot available")]
    ExactMatch,
    #[serde(rename = "Within 1 hour of requested time")]
    WithinOneHour,
    #[serde(rename = "Within 2 hours of requested time")]
    WithinTwoHours,
    #[serde(rename = "Alternative time slot available")]
    Alternative,
}

impl SlotReason {
    pub fn classify(requested: &TimeRange, slot: &TimeRange) -> Self {
        if requested == slot {
            return SlotReason::ExactMatch;
        }
        match requested.start.abs_diff(slot.start) {
            0..=60 => SlotReason::WithinOneHour,
            61..=120 => SlotReason::WithinTwoHours,
            _ => SlotReason::Alternative,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotReason::ExactMatch => "Exact time slot available",
            SlotReason::WithinOneHour => "Within 1 hour of requested time",
            SlotReason::WithinTwoHours => "Within 2 hours of requested time",
            SlotReason::Alternative => "Alternative time slot available",
        }
    }
}

/// A bookable suggestion. Computed per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedSlot {
    pub painter_id: UserId,
    pub painter_name: String,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub day_of_week: DayOfWeek,
    pub reason: SlotReason,
    /// Minutes between the requested start and this slot's start.
    pub time_difference: u32,
    pub painter_rating: f64,
}

/// Query string of `GET /api/recommendations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationQuery {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub painter_id: Option<UserId>,
    pub limit: Option<usize>,
}
