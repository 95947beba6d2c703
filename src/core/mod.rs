//! Core business logic - framework-agnostic registration, scheduling, booking, sales,
//! suspension, and reporting.

/// Booking and cancellation rules
pub mod booking;
/// Session catalog
pub mod catalog;
/// Injectable time source
pub mod clock;
/// Per-role dashboards
pub mod dashboard;
/// User directory (registration, login)
pub mod directory;
/// All aggregates behind one handle
pub mod gym;
/// Argon2id password hashing
pub mod password;
/// Payment methods
pub mod payment;
/// Admin report
pub mod report;
/// Membership sales
pub mod sales;
/// Suspension requests
pub mod suspension;
