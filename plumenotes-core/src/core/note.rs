//! The note data model and the id allocator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier for a note.
///
/// Ids are millisecond-timestamp-shaped integers, which keeps data files
/// written by earlier releases readable. Uniqueness is guaranteed by
/// [`IdAllocator`], not by the clock.
pub type NoteId = i64;

/// A single note as stored in the data file.
///
/// Field names serialize in camelCase (`createdAt` / `updatedAt`) to match
/// the on-disk document format. `updated_at` is omitted from the JSON while
/// the note has never been saved after its initial creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Creates an empty note with the given id, stamped with the current time.
    pub fn new(id: NoteId) -> Self {
        Self {
            id,
            title: String::new(),
            content: String::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Case-insensitive substring match over title and content.
    ///
    /// An empty query matches every note.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.content.to_lowercase().contains(&query)
    }
}

/// Hands out strictly increasing note ids.
///
/// Seeded from the loaded collection so restarts never reuse an id. Ids track
/// the wall clock in milliseconds where possible, but two allocations within
/// the same millisecond still produce distinct values.
#[derive(Debug)]
pub struct IdAllocator {
    last: NoteId,
}

impl IdAllocator {
    /// Creates an allocator whose next id is greater than every id in `notes`.
    pub fn seeded_from(notes: &[Note]) -> Self {
        let last = notes.iter().map(|n| n.id).max().unwrap_or(0);
        Self { last }
    }

    /// Returns a fresh id, greater than any id handed out or seeded so far.
    pub fn next(&mut self) -> NoteId {
        let candidate = Utc::now().timestamp_millis();
        self.last = candidate.max(self.last + 1);
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: NoteId, title: &str, content: &str) -> Note {
        Note {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let n = note(1, "Alpha", "x");
        assert!(n.matches("alpha"));
        assert!(n.matches("ALPHA"));
        assert!(n.matches("lph"));
        assert!(!n.matches("beta"));
    }

    #[test]
    fn test_matches_searches_content_too() {
        let n = note(1, "Beta", "alpha inside");
        assert!(n.matches("alpha"));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let n = note(1, "", "");
        assert!(n.matches(""));
    }

    #[test]
    fn test_serializes_in_camel_case() {
        let n = note(1716899000000, "A", "b");
        let value = serde_json::to_value(&n).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_updated_at_omitted_when_never_saved() {
        let n = note(1, "A", "b");
        let value = serde_json::to_value(&n).unwrap();
        assert!(value.get("updatedAt").is_none());

        let mut n = n;
        n.updated_at = Some(Utc::now());
        let value = serde_json::to_value(&n).unwrap();
        assert!(value.get("updatedAt").is_some());
    }

    #[test]
    fn test_parses_historical_document_shape() {
        // The shape earlier releases wrote: integer id, RFC 3339 timestamps,
        // no updatedAt until the first post-creation save.
        let json = r#"{
            "id": 1716899000000,
            "title": "Groceries",
            "content": "milk",
            "createdAt": "2024-05-28T12:03:20.000Z"
        }"#;
        let n: Note = serde_json::from_str(json).unwrap();
        assert_eq!(n.id, 1716899000000);
        assert_eq!(n.title, "Groceries");
        assert!(n.updated_at.is_none());
    }

    #[test]
    fn test_id_allocator_is_strictly_increasing() {
        let mut ids = IdAllocator::seeded_from(&[]);
        let mut seen = Vec::new();
        // Far more allocations than milliseconds will elapse, so this only
        // passes if same-millisecond allocations are disambiguated.
        for _ in 0..1000 {
            seen.push(ids.next());
        }
        for pair in seen.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_id_allocator_seeds_above_existing_ids() {
        let far_future = Utc::now().timestamp_millis() + 1_000_000;
        let existing = vec![note(far_future, "A", "")];
        let mut ids = IdAllocator::seeded_from(&existing);
        assert!(ids.next() > far_future);
    }
}
