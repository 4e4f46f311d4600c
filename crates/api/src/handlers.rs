pub mod availability;
pub mod booking;
pub mod booking_request;
pub mod painter;
pub mod recommendation;
