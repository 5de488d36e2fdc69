//! Utility functions for job identifiers and timestamp handling.

pub mod timestamps;

pub use timestamps::{clock_time, now_utc, Timestamp};

use uuid::Uuid;

/// Generates a new UUID v4.
#[must_use]
pub fn generate_uuid() -> Uuid {
    Uuid::new_v4()
}
