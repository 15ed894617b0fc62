//! Close/undo operations over a tab source
//!
//! One controller instance owns the undo slot and serves every client
//! request. The clock and the picker are injected so expiry and the
//! random draw stay deterministic under test.

use crate::clock::{Clock, SystemClock};
use crate::picker::{TabPicker, UniformPicker};
use crate::undo_buffer::{Peek, UndoBuffer};
use std::sync::Arc;
use tab_roulette_core::protocol::{
    CloseTabResponse, ClosedTabSummary, LastClosedInfoResponse, LastClosedTabSummary,
    ReopenTabResponse, ReopenedTabSummary, TabCountResponse,
};
use tab_roulette_core::{ClosedTabRecord, CreateTabSpec, WindowScope};
use tab_source::TabSource;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Serves the close, reopen, and inspect operations.
pub struct RouletteController {
    tabs: Arc<dyn TabSource>,
    buffer: Mutex<UndoBuffer>,
    clock: Arc<dyn Clock>,
    picker: Arc<dyn TabPicker>,
}

impl RouletteController {
    /// Create a controller with the production clock and a uniform draw.
    pub fn new(tabs: Arc<dyn TabSource>) -> Self {
        Self::with_parts(tabs, Arc::new(SystemClock), Arc::new(UniformPicker))
    }

    /// Assemble a controller from explicit parts.
    pub fn with_parts(
        tabs: Arc<dyn TabSource>,
        clock: Arc<dyn Clock>,
        picker: Arc<dyn TabPicker>,
    ) -> Self {
        Self {
            tabs,
            buffer: Mutex::new(UndoBuffer::new()),
            clock,
            picker,
        }
    }

    // ===== Close Random Tab =====

    /// Close one randomly drawn tab in the current window.
    ///
    /// Refuses when at most one tab is open, so the window always keeps a
    /// live tab. The closed tab is remembered before removal is attempted:
    /// if the browser fails mid-close the record may describe a tab that is
    /// still open, and a later reopen would then duplicate it. That is
    /// accepted in exchange for never losing the undo record.
    pub async fn close_random_tab(&self) -> CloseTabResponse {
        let tabs = match self.tabs.list_tabs(WindowScope::Current).await {
            Ok(tabs) => tabs,
            Err(e) => {
                warn!("Failed to enumerate tabs: {}", e);
                return CloseTabResponse::error(e.to_string());
            }
        };

        if tabs.len() <= 1 {
            info!("Refusing to close: {} tab(s) open", tabs.len());
            return CloseTabResponse::last_tab();
        }

        let total_tabs = tabs.len();
        let drawn = self.picker.pick(total_tabs);
        let target = &tabs[drawn];

        info!(
            "Closing tab {}/{}: {} ({})",
            drawn + 1,
            total_tabs,
            target.title,
            target.url
        );

        let record = ClosedTabRecord::snapshot(target, self.clock.now());
        self.buffer.lock().await.store(record);

        if let Err(e) = self.tabs.remove_tab(&target.id).await {
            // The record stays stored; the tab may or may not be gone.
            warn!("Failed to remove tab {}: {}", target.id, e);
            return CloseTabResponse::error(e.to_string());
        }

        CloseTabResponse::closed(ClosedTabSummary {
            title: target.title.clone(),
            url: target.url.clone(),
            index: drawn,
            total_tabs,
        })
    }

    // ===== Reopen Last Tab =====

    /// Restore the most recently closed tab at its old position.
    ///
    /// The undo slot is cleared only after the browser confirms the new
    /// tab, so a failed reopen can be retried while the window lasts.
    pub async fn reopen_last_tab(&self) -> ReopenTabResponse {
        let peeked = self.buffer.lock().await.peek(self.clock.now());
        let record = match peeked {
            Peek::Fresh(record) => record,
            Peek::Expired => {
                info!("Undo window lapsed for the last closed tab");
                return ReopenTabResponse::tab_too_old();
            }
            Peek::Empty => {
                debug!("Reopen requested with an empty undo slot");
                return ReopenTabResponse::no_tab_to_reopen();
            }
        };

        match self.tabs.create_tab(CreateTabSpec::from(&record)).await {
            Ok(created) => {
                self.buffer.lock().await.clear();
                info!("Reopened tab: {} ({})", record.title, record.url);
                ReopenTabResponse::reopened(ReopenedTabSummary {
                    title: record.title,
                    url: record.url,
                    id: created.id,
                })
            }
            Err(e) => {
                warn!("Failed to reopen tab: {}", e);
                ReopenTabResponse::error(e.to_string())
            }
        }
    }

    // ===== Inspect Last Closed =====

    /// Describe the tab currently held in the undo slot.
    ///
    /// A lapsed record reads the same as an empty slot, but inspecting it
    /// drops it, so a reopen attempted afterwards reports the slot as
    /// empty rather than expired.
    pub async fn last_closed_tab_info(&self) -> LastClosedInfoResponse {
        match self.buffer.lock().await.peek(self.clock.now()) {
            Peek::Fresh(record) => LastClosedInfoResponse::present(LastClosedTabSummary {
                title: record.title,
                url: record.url,
                closed_at: record.closed_at,
            }),
            Peek::Expired | Peek::Empty => LastClosedInfoResponse::absent(),
        }
    }

    // ===== Tab Count =====

    /// Count the open tabs in the current window.
    pub async fn tab_count(&self) -> TabCountResponse {
        match self.tabs.list_tabs(WindowScope::Current).await {
            Ok(tabs) => TabCountResponse::counted(tabs.len()),
            Err(e) => {
                warn!("Failed to enumerate tabs: {}", e);
                TabCountResponse::error(e.to_string())
            }
        }
    }
}
