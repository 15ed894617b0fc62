//! In-memory tab source for tests
//!
//! Emulates a single browser window deterministically: removal shifts later
//! tabs left, creation inserts at the clamped index, and ids are freshly
//! minted UUIDs. Each operation can be primed to fail exactly once so error
//! paths can be exercised.

use crate::traits::TabSource;
use async_trait::async_trait;
use tab_roulette_core::{CreateTabSpec, TabId, TabInfo, TabSourceError, WindowScope};
use tokio::sync::Mutex;

// Indices are derived from position on read, so shifts fall out of Vec
// insertion and removal.
#[derive(Debug, Clone)]
struct StoredTab {
    id: TabId,
    title: String,
    url: String,
    pinned: bool,
}

#[derive(Debug, Default)]
struct InjectedFailures {
    list: Option<String>,
    remove: Option<String>,
    create: Option<String>,
}

/// Deterministic single-window tab source
pub struct MockTabSource {
    window: Mutex<Vec<StoredTab>>,
    failures: Mutex<InjectedFailures>,
    activated: Mutex<Option<TabId>>,
}

impl MockTabSource {
    pub fn new() -> Self {
        Self {
            window: Mutex::new(Vec::new()),
            failures: Mutex::new(InjectedFailures::default()),
            activated: Mutex::new(None),
        }
    }

    /// Append an unpinned tab, returning its id
    pub async fn add_tab(&self, title: &str, url: &str) -> TabId {
        self.push(title, url, false).await
    }

    /// Append a pinned tab, returning its id
    pub async fn add_pinned_tab(&self, title: &str, url: &str) -> TabId {
        self.push(title, url, true).await
    }

    async fn push(&self, title: &str, url: &str, pinned: bool) -> TabId {
        let id = TabId::random();
        self.window.lock().await.push(StoredTab {
            id: id.clone(),
            title: title.to_string(),
            url: url.to_string(),
            pinned,
        });
        id
    }

    /// Current window contents, bypassing failure injection
    pub async fn snapshot(&self) -> Vec<TabInfo> {
        let window = self.window.lock().await;
        window.iter().enumerate().map(to_tab_info).collect()
    }

    pub async fn tab_count(&self) -> usize {
        self.window.lock().await.len()
    }

    /// The tab most recently created with `active: true`
    pub async fn last_activated(&self) -> Option<TabId> {
        self.activated.lock().await.clone()
    }

    /// Make the next `list_tabs` call fail with the given message
    pub async fn fail_next_list(&self, message: &str) {
        self.failures.lock().await.list = Some(message.to_string());
    }

    /// Make the next `remove_tab` call fail with the given message
    pub async fn fail_next_remove(&self, message: &str) {
        self.failures.lock().await.remove = Some(message.to_string());
    }

    /// Make the next `create_tab` call fail with the given message
    pub async fn fail_next_create(&self, message: &str) {
        self.failures.lock().await.create = Some(message.to_string());
    }
}

impl Default for MockTabSource {
    fn default() -> Self {
        Self::new()
    }
}

fn to_tab_info((index, tab): (usize, &StoredTab)) -> TabInfo {
    TabInfo {
        id: tab.id.clone(),
        title: tab.title.clone(),
        url: tab.url.clone(),
        index,
        pinned: tab.pinned,
    }
}

#[async_trait]
impl TabSource for MockTabSource {
    async fn list_tabs(&self, _scope: WindowScope) -> Result<Vec<TabInfo>, TabSourceError> {
        // One window only, so Current and All coincide.
        if let Some(details) = self.failures.lock().await.list.take() {
            return Err(TabSourceError::Rejected { details });
        }
        Ok(self.snapshot().await)
    }

    async fn remove_tab(&self, id: &TabId) -> Result<(), TabSourceError> {
        if let Some(details) = self.failures.lock().await.remove.take() {
            return Err(TabSourceError::Rejected { details });
        }

        let mut window = self.window.lock().await;
        match window.iter().position(|t| &t.id == id) {
            Some(position) => {
                window.remove(position);
                Ok(())
            }
            None => Err(TabSourceError::TabNotFound { id: id.clone() }),
        }
    }

    async fn create_tab(&self, spec: CreateTabSpec) -> Result<TabInfo, TabSourceError> {
        if let Some(details) = self.failures.lock().await.create.take() {
            return Err(TabSourceError::Rejected { details });
        }

        let mut window = self.window.lock().await;
        let index = spec.index.min(window.len());
        let id = TabId::random();
        window.insert(
            index,
            StoredTab {
                id: id.clone(),
                // Real browsers title a fresh tab by its URL until the page
                // loads.
                title: spec.url.clone(),
                url: spec.url.clone(),
                pinned: spec.pinned,
            },
        );
        drop(window);

        if spec.active {
            *self.activated.lock().await = Some(id.clone());
        }

        Ok(TabInfo {
            id,
            title: spec.url.clone(),
            url: spec.url,
            index,
            pinned: spec.pinned,
        })
    }
}
