//! Tab source traits

use async_trait::async_trait;
use tab_roulette_core::{CreateTabSpec, TabId, TabInfo, TabSourceError, WindowScope};

/// Trait for tab-management backends
///
/// Everything the rest of the system knows about a browser: enumerate open
/// tabs, remove one, create one. All failures are [`TabSourceError`] values;
/// implementations never panic on a misbehaving browser.
#[async_trait]
pub trait TabSource: Send + Sync {
    /// Snapshot the open tabs, ordered by window position
    ///
    /// Each returned [`TabInfo`]'s `index` equals its position in the
    /// returned vector.
    async fn list_tabs(&self, scope: WindowScope) -> Result<Vec<TabInfo>, TabSourceError>;

    /// Close one tab
    async fn remove_tab(&self, id: &TabId) -> Result<(), TabSourceError>;

    /// Create a tab, clamping the requested index to the current tab count
    ///
    /// Returns the created tab with its newly assigned id.
    async fn create_tab(&self, spec: CreateTabSpec) -> Result<TabInfo, TabSourceError>;
}
