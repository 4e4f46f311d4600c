pub mod availability;
pub mod booking;
pub mod booking_request;
pub mod health;
pub mod painter;
pub mod recommendation;
