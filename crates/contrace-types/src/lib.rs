//! # contrace-types
//!
//! Shared domain types used across the Contrace workspace.

pub mod dates;
pub mod payload;

/// Row id of a device in the central store.
pub type DeviceId = i64;

/// Row id of a contact record in the central store.
pub type ContactId = i64;

/// Days on either side of a positive test's collection date within which a
/// contact counts as a qualifying exposure (inclusive).
pub const EXPOSURE_WINDOW_DAYS: i64 = 14;
