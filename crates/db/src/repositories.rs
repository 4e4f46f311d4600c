pub mod availability;
pub mod booking;
pub mod painter;
pub mod user;
