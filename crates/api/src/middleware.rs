/// Maps `BookingError` onto HTTP responses
pub mod error_handling;
