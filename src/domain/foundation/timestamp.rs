//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_now_is_ordered_after_earlier_timestamps() {
        let before = Timestamp::now();
        let after = Timestamp::now();

        assert!(after >= before);
    }

    #[test]
    fn timestamp_serializes_to_rfc3339() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-15T10:30:00Z\"").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.contains("2024-01-15T10:30:00"));
    }

    #[test]
    fn timestamp_deserializes_from_json() {
        let earlier: Timestamp = serde_json::from_str("\"2024-01-15T10:30:00Z\"").unwrap();
        let later: Timestamp = serde_json::from_str("\"2024-01-15T10:31:00Z\"").unwrap();

        assert!(later > earlier);
        assert_eq!(
            earlier,
            serde_json::from_str::<Timestamp>("\"2024-01-15T10:30:00+00:00\"").unwrap()
        );
    }
}
