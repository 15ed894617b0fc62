//! Single-slot memory of the last closed tab
//!
//! At most one closed tab is reopenable at a time. Expiry is lazy:
//! nothing fires when the undo window lapses, the slot is judged against
//! the clock on the next access and cleared if it is too old.

use chrono::{DateTime, Utc};
use tab_roulette_core::ClosedTabRecord;

/// How long a closed tab stays reopenable, in milliseconds.
pub const UNDO_TTL_MS: i64 = 5 * 60 * 1000;

/// Outcome of a time-aware read of the slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Peek {
    /// A record exists and is still within the undo window.
    Fresh(ClosedTabRecord),
    /// A record existed but its window had lapsed; the slot is now empty.
    Expired,
    /// Nothing is stored.
    Empty,
}

/// Holds the most recently closed tab, if any.
///
/// Storing a new record overwrites the previous one unconditionally.
#[derive(Debug, Default)]
pub struct UndoBuffer {
    slot: Option<ClosedTabRecord>,
}

impl UndoBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `record` as the only reopenable tab.
    pub fn store(&mut self, record: ClosedTabRecord) {
        self.slot = Some(record);
    }

    /// Read the slot against `now`, clearing it when the window has lapsed.
    ///
    /// A record aged exactly [`UNDO_TTL_MS`] is still fresh; expiry starts
    /// strictly beyond it. `Expired` is reported at most once per record:
    /// the lapsed record is dropped here, so the next peek sees `Empty`.
    pub fn peek(&mut self, now: DateTime<Utc>) -> Peek {
        let record = match &self.slot {
            Some(record) => record,
            None => return Peek::Empty,
        };

        let age_ms = now.signed_duration_since(record.closed_at).num_milliseconds();
        if age_ms > UNDO_TTL_MS {
            self.slot = None;
            Peek::Expired
        } else {
            Peek::Fresh(record.clone())
        }
    }

    /// Drop the stored record, if any.
    pub fn clear(&mut self) {
        self.slot = None;
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tab_roulette_core::{TabId, TabInfo};

    fn start() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
    }

    fn record_at(closed_at: DateTime<Utc>, url: &str) -> ClosedTabRecord {
        let tab = TabInfo {
            id: TabId::random(),
            title: "Example".to_string(),
            url: url.to_string(),
            index: 2,
            pinned: false,
        };
        ClosedTabRecord::snapshot(&tab, closed_at)
    }

    #[test]
    fn test_empty_buffer_peeks_empty() {
        let mut buffer = UndoBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.peek(start()), Peek::Empty);
    }

    #[test]
    fn test_fresh_record_survives_repeated_peeks() {
        let mut buffer = UndoBuffer::new();
        buffer.store(record_at(start(), "https://example.com/"));

        let later = start() + Duration::milliseconds(1_000);
        match buffer.peek(later) {
            Peek::Fresh(record) => assert_eq!(record.url, "https://example.com/"),
            other => panic!("expected fresh record, got {:?}", other),
        }
        // Peeking does not consume a fresh record.
        assert!(matches!(buffer.peek(later), Peek::Fresh(_)));
    }

    #[test]
    fn test_age_exactly_at_limit_is_still_fresh() {
        let mut buffer = UndoBuffer::new();
        buffer.store(record_at(start(), "https://example.com/"));

        let boundary = start() + Duration::milliseconds(UNDO_TTL_MS);
        assert!(matches!(buffer.peek(boundary), Peek::Fresh(_)));
    }

    #[test]
    fn test_age_beyond_limit_expires_once() {
        let mut buffer = UndoBuffer::new();
        buffer.store(record_at(start(), "https://example.com/"));

        let lapsed = start() + Duration::milliseconds(UNDO_TTL_MS + 1);
        assert_eq!(buffer.peek(lapsed), Peek::Expired);
        // The record was dropped, so a second read finds nothing.
        assert_eq!(buffer.peek(lapsed), Peek::Empty);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_store_overwrites_previous_record() {
        let mut buffer = UndoBuffer::new();
        buffer.store(record_at(start(), "https://first.example/"));
        buffer.store(record_at(start(), "https://second.example/"));

        match buffer.peek(start()) {
            Peek::Fresh(record) => assert_eq!(record.url, "https://second.example/"),
            other => panic!("expected fresh record, got {:?}", other),
        }
    }

    #[test]
    fn test_clear_empties_the_slot() {
        let mut buffer = UndoBuffer::new();
        buffer.store(record_at(start(), "https://example.com/"));
        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.peek(start()), Peek::Empty);
    }

    #[test]
    fn test_record_from_the_future_is_fresh() {
        // Clock skew can put closed_at ahead of now; a negative age must
        // not count as expired.
        let mut buffer = UndoBuffer::new();
        buffer.store(record_at(start() + Duration::milliseconds(10_000), "https://example.com/"));

        assert!(matches!(buffer.peek(start()), Peek::Fresh(_)));
    }
}
