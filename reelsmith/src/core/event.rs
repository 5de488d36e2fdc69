//! Timestamped log events appended to a job's history.

use crate::utils::{clock_time, now_utc, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One immutable entry in a job log.
///
/// The timestamp is captured when the event is created, which is the moment
/// it is appended; log order is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// When the event was appended.
    pub timestamp: Timestamp,
    /// The human-readable message.
    pub message: String,
}

impl LogEvent {
    /// Creates a log event stamped with the current time.
    #[must_use]
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            timestamp: now_utc(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", clock_time(&self.timestamp), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_event_display() {
        let event = LogEvent {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 13, 4, 5).unwrap(),
            message: "Rendering video frames...".to_string(),
        };
        assert_eq!(event.to_string(), "[13:04:05] Rendering video frames...");
    }

    #[test]
    fn test_event_serialization() {
        let event = LogEvent::now("hello");
        let json = serde_json::to_string(&event).unwrap();
        let back: LogEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
