//! Request routing

use crate::controller::RouletteController;
use tab_roulette_core::protocol::{Request, Response};
use tracing::debug;

/// Route one request to its operation.
///
/// Returns `None` for unrecognized actions: those are ignored without a
/// reply and leave a trace only in the logs.
pub async fn dispatch(controller: &RouletteController, request: Request) -> Option<Response> {
    match request {
        Request::CloseRandomTab => Some(Response::Close(controller.close_random_tab().await)),
        Request::ReopenLastTab => Some(Response::Reopen(controller.reopen_last_tab().await)),
        Request::GetLastClosedTabInfo => {
            Some(Response::LastClosed(controller.last_closed_tab_info().await))
        }
        Request::GetTabCount => Some(Response::TabCount(controller.tab_count().await)),
        Request::Unrecognized => {
            debug!("Ignoring request with unrecognized action");
            None
        }
    }
}
