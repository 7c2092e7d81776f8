//! Archived conversation records.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::state::StateSnapshot;

/// One persisted record of a finished (or checkpointed) conversation.
///
/// Records live in a single JSON array per persona and are never edited
/// after the fact; new conversations only append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveRecord {
    /// Monotonically increasing within one archive file.
    pub id: u64,
    /// RFC3339 capture time.
    pub timestamp: String,
    /// Human-readable one-liner of what was captured.
    pub summary: String,
    /// The captured fields themselves.
    pub payload: StateSnapshot,
}

impl ArchiveRecord {
    /// Builds a record stamped with the current time.
    pub fn new(id: u64, summary: impl Into<String>, payload: StateSnapshot) -> Self {
        Self {
            id,
            timestamp: Utc::now().to_rfc3339(),
            summary: summary.into(),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FieldValue;

    #[test]
    fn test_new_stamps_parseable_timestamp() {
        let record = ArchiveRecord::new(1, "test", StateSnapshot::new());
        assert!(chrono::DateTime::parse_from_rfc3339(&record.timestamp).is_ok());
    }

    #[test]
    fn test_serializes_payload_as_plain_json() {
        let mut payload = StateSnapshot::new();
        payload.insert("name".to_string(), FieldValue::Text("Dana".to_string()));
        payload.insert(
            "goals".to_string(),
            FieldValue::Items(vec!["ship".to_string()]),
        );

        let record = ArchiveRecord::new(3, "name: Dana", payload);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["payload"]["name"], "Dana");
        assert_eq!(json["payload"]["goals"][0], "ship");
    }
}
