pub mod assignment;
pub mod availability;
pub mod booking;
pub mod painter;
pub mod recommendation;

/// Identifier of a user account; painters and customers are both users.
pub type UserId = i64;
