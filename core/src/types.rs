//! Core domain types shared across the workspace

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque tab identifier
///
/// Backends choose the wire format: the DevTools backend carries browser
/// target ids, the mock backend mints UUIDs. Serializes as a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub String);

impl TabId {
    /// Mint a fresh random id (mock backends, tests)
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TabId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// An open tab as reported by a tab source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: TabId,
    pub title: String,
    pub url: String,
    /// Position within the window, 0-based
    pub index: usize,
    pub pinned: bool,
}

/// Snapshot of a tab taken just before it is closed
///
/// The only state the system keeps. Held in memory in a single slot;
/// `index` is the tab's original window position so restoration can put
/// it back where it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedTabRecord {
    pub title: String,
    pub url: String,
    pub index: usize,
    pub pinned: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub closed_at: DateTime<Utc>,
}

impl ClosedTabRecord {
    /// Snapshot an open tab at the given instant
    pub fn snapshot(tab: &TabInfo, closed_at: DateTime<Utc>) -> Self {
        Self {
            title: tab.title.clone(),
            url: tab.url.clone(),
            index: tab.index,
            pinned: tab.pinned,
            closed_at,
        }
    }
}

/// Arguments for creating (restoring) a tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTabSpec {
    pub url: String,
    /// Desired window position; sources clamp to the current tab count
    pub index: usize,
    pub pinned: bool,
    /// Whether the new tab should take focus
    pub active: bool,
}

impl From<&ClosedTabRecord> for CreateTabSpec {
    fn from(record: &ClosedTabRecord) -> Self {
        Self {
            url: record.url.clone(),
            index: record.index,
            pinned: record.pinned,
            active: true,
        }
    }
}

/// Which tabs an enumeration should cover
///
/// Sources that cannot distinguish windows treat the whole browser as one
/// current window and document that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WindowScope {
    /// Tabs of the focused window only
    Current,
    /// Every tab in the browser
    All,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_id_serializes_as_bare_string() {
        let id = TabId::from("ABC123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""ABC123""#);

        let back: TabId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_random_tab_ids_are_unique() {
        let a = TabId::random();
        let b = TabId::random();
        assert_ne!(a, b);
    }

    #[test]
    fn test_closed_tab_record_snapshot_copies_all_fields() {
        let tab = TabInfo {
            id: TabId::from("t1"),
            title: "Docs".to_string(),
            url: "https://x/docs".to_string(),
            index: 1,
            pinned: true,
        };
        let now = Utc::now();
        let record = ClosedTabRecord::snapshot(&tab, now);

        assert_eq!(record.title, "Docs");
        assert_eq!(record.url, "https://x/docs");
        assert_eq!(record.index, 1);
        assert!(record.pinned);
        assert_eq!(record.closed_at, now);
    }

    #[test]
    fn test_create_tab_spec_from_record_is_active() {
        let record = ClosedTabRecord {
            title: "Docs".to_string(),
            url: "https://x/docs".to_string(),
            index: 3,
            pinned: false,
            closed_at: Utc::now(),
        };
        let spec = CreateTabSpec::from(&record);

        assert_eq!(spec.url, "https://x/docs");
        assert_eq!(spec.index, 3);
        assert!(!spec.pinned);
        assert!(spec.active);
    }

    #[test]
    fn test_closed_at_serializes_as_epoch_milliseconds() {
        let record = ClosedTabRecord {
            title: "t".to_string(),
            url: "u".to_string(),
            index: 0,
            pinned: false,
            closed_at: DateTime::from_timestamp_millis(1_700_000_000_123).unwrap(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["closedAt"], 1_700_000_000_123i64);
    }
}
