//! # Paintbook Core
//!
//! Domain layer of the Paintbook booking service: painters publish
//! availability windows, customers request a time range, and the service
//! either assigns the best free painter or suggests nearby slots.
//!
//! ## Architecture
//!
//! - **Time**: half-open interval arithmetic on wall-clock times
//! - **Store**: collaborator traits for availability, bookings and painter profiles
//! - **Services**: the matching engine, the recommendation engine and the
//!   booking assignment flow built on top of them
//! - **Memory**: a process-local store used by tests and local runs
//!
//! The PostgreSQL store lives in `paintbook-db` and the HTTP surface in
//! `paintbook-api`.

/// Domain error type shared by every crate
pub mod errors;
/// In-memory implementation of the store traits
pub mod memory;
/// Domain and wire models
pub mod models;
/// Matching, recommendation and assignment
pub mod services;
/// Collaborator traits
pub mod store;
/// Time-of-day parsing, formatting and interval predicates
pub mod time;
