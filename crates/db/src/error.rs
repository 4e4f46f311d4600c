use thiserror::Error;

/// SQLSTATE raised by the `no_overlapping_bookings` exclusion constraint.
pub const EXCLUSION_VIOLATION: &str = "23P01";

/// SQLSTATE raised when a row names a user id that does not exist.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

/// An active booking already holds the requested painter time.
///
/// Travels inside an `eyre::Report` out of the repositories; the store
/// downcasts it back into a domain conflict.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct BookingOverlap(pub String);

/// A write referenced a painter or customer id with no user row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct MissingReference(pub String);

fn has_code(error: &sqlx::Error, code: &str) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.code().as_deref() == Some(code),
        _ => false,
    }
}

/// Whether `error` is the database rejecting an overlapping booking.
pub fn is_exclusion_violation(error: &sqlx::Error) -> bool {
    has_code(error, EXCLUSION_VIOLATION)
}

pub fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    has_code(error, FOREIGN_KEY_VIOLATION)
}
