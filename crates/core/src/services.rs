pub mod assignment;
pub mod booking;
pub mod matching;
pub mod recommendation;

pub use assignment::BookingAssignmentService;
pub use booking::BookingService;
pub use matching::MatchingEngine;
pub use recommendation::RecommendationEngine;
