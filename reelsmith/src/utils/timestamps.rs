//! Timestamp helpers.

use chrono::{DateTime, Utc};

/// Represents a timestamp that can be serialized/deserialized.
pub type Timestamp = DateTime<Utc>;

/// Returns the current UTC timestamp.
#[must_use]
pub fn now_utc() -> Timestamp {
    Utc::now()
}

/// Formats a timestamp as a wall-clock time, `HH:MM:SS`.
///
/// # Examples
///
/// ```
/// use reelsmith::utils::{clock_time, now_utc};
///
/// let clock = clock_time(&now_utc());
/// assert_eq!(clock.len(), 8);
/// assert_eq!(clock.matches(':').count(), 2);
/// ```
#[must_use]
pub fn clock_time(ts: &Timestamp) -> String {
    ts.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_clock_time() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 42).unwrap();
        assert_eq!(clock_time(&ts), "07:05:42");
    }

    #[test]
    fn test_now_is_monotonic_enough() {
        let a = now_utc();
        let b = now_utc();
        assert!(b >= a);
    }
}
