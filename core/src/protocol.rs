//! Wire protocol between the daemon and its clients
//!
//! Messages travel over a Unix domain socket as 4-byte big-endian
//! length-prefixed JSON frames. A connection carries one request and at most
//! one reply: requests with an unrecognized action are dropped without a
//! reply, so the client observes a clean EOF instead of an error.

use crate::errors::ProtocolError;
use crate::types::TabId;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Upper bound on a single frame payload
pub const MAX_FRAME_BYTES: usize = 1024 * 1024;

/// Request from client to daemon, tagged by action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    /// Close one randomly chosen tab in the current window
    CloseRandomTab,

    /// Restore the most recently closed tab
    ReopenLastTab,

    /// Describe the tab currently held in the undo slot
    GetLastClosedTabInfo,

    /// Count the open tabs in the current window
    GetTabCount,

    /// Catch-all for unknown action tags; handled by ignoring the message
    #[serde(other)]
    Unrecognized,
}

/// Why an operation refused or failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Closing was refused because at most one tab is open
    LastTab,
    /// The undo slot is empty
    NoTabToReopen,
    /// The undo slot held a record older than the undo window
    TabTooOld,
    /// A tab source operation failed
    Error,
}

/// The tab a close operation removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedTabSummary {
    pub title: String,
    pub url: String,
    /// The drawn position, 0-based within the pre-close enumeration
    pub index: usize,
    /// How many tabs were open before the close
    pub total_tabs: usize,
}

/// The tab a reopen operation created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReopenedTabSummary {
    pub title: String,
    pub url: String,
    /// Identifier of the newly created tab, not the closed one
    pub id: TabId,
}

/// The undo slot contents as reported to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastClosedTabSummary {
    pub title: String,
    pub url: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub closed_at: DateTime<Utc>,
}

/// Reply to [`Request::CloseRandomTab`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CloseTabResponse {
    Closed {
        success: bool,
        #[serde(rename = "closedTab")]
        closed_tab: ClosedTabSummary,
    },
    Failed {
        success: bool,
        reason: FailureReason,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl CloseTabResponse {
    pub fn closed(closed_tab: ClosedTabSummary) -> Self {
        Self::Closed {
            success: true,
            closed_tab,
        }
    }

    pub fn last_tab() -> Self {
        Self::Failed {
            success: false,
            reason: FailureReason::LastTab,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Failed {
            success: false,
            reason: FailureReason::Error,
            error: Some(message.into()),
        }
    }
}

/// Reply to [`Request::ReopenLastTab`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReopenTabResponse {
    Reopened {
        success: bool,
        #[serde(rename = "reopenedTab")]
        reopened_tab: ReopenedTabSummary,
    },
    Failed {
        success: bool,
        reason: FailureReason,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl ReopenTabResponse {
    pub fn reopened(reopened_tab: ReopenedTabSummary) -> Self {
        Self::Reopened {
            success: true,
            reopened_tab,
        }
    }

    pub fn no_tab_to_reopen() -> Self {
        Self::Failed {
            success: false,
            reason: FailureReason::NoTabToReopen,
            error: None,
        }
    }

    pub fn tab_too_old() -> Self {
        Self::Failed {
            success: false,
            reason: FailureReason::TabTooOld,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Failed {
            success: false,
            reason: FailureReason::Error,
            error: Some(message.into()),
        }
    }
}

/// Reply to [`Request::GetLastClosedTabInfo`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LastClosedInfoResponse {
    Present {
        #[serde(rename = "hasLastTab")]
        has_last_tab: bool,
        tab: LastClosedTabSummary,
    },
    Absent {
        #[serde(rename = "hasLastTab")]
        has_last_tab: bool,
    },
}

impl LastClosedInfoResponse {
    pub fn present(tab: LastClosedTabSummary) -> Self {
        Self::Present {
            has_last_tab: true,
            tab,
        }
    }

    pub fn absent() -> Self {
        Self::Absent {
            has_last_tab: false,
        }
    }
}

/// Reply to [`Request::GetTabCount`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TabCountResponse {
    Counted {
        success: bool,
        #[serde(rename = "tabCount")]
        tab_count: usize,
    },
    Failed {
        success: bool,
        reason: FailureReason,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl TabCountResponse {
    pub fn counted(tab_count: usize) -> Self {
        Self::Counted {
            success: true,
            tab_count,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Failed {
            success: false,
            reason: FailureReason::Error,
            error: Some(message.into()),
        }
    }
}

/// Any reply the daemon can send
///
/// Serialize-only on purpose: the failure shapes of different operations are
/// identical on the wire, so clients must decode the concrete response type
/// they expect for the request they sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Close(CloseTabResponse),
    Reopen(ReopenTabResponse),
    LastClosed(LastClosedInfoResponse),
    TabCount(TabCountResponse),
}

/// Default rendezvous path for the daemon socket
pub fn default_socket_path() -> PathBuf {
    dirs::runtime_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("tab-roulette.sock")
}

/// Frame a payload for transport.
///
/// Format: 4-byte big-endian length prefix + JSON payload.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // frames are capped well below 4GB
pub fn frame_message(message: &[u8]) -> Vec<u8> {
    let len = message.len() as u32;
    let mut framed = Vec::with_capacity(4 + message.len());
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(message);
    framed
}

/// Parse a framed payload length.
///
/// Returns the payload length if a complete length prefix is present.
#[must_use]
pub fn parse_frame_length(buffer: &[u8]) -> Option<usize> {
    if buffer.len() < 4 {
        return None;
    }
    let len = u32::from_be_bytes([buffer[0], buffer[1], buffer[2], buffer[3]]);
    Some(len as usize)
}

/// Write one framed payload
pub async fn write_frame<W>(writer: &mut W, payload: &[u8]) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    if payload.len() > MAX_FRAME_BYTES {
        return Err(ProtocolError::FrameTooLarge {
            size: payload.len(),
            max: MAX_FRAME_BYTES,
        });
    }
    writer.write_all(&frame_message(payload)).await?;
    writer.flush().await?;
    Ok(())
}

/// Read one framed payload
///
/// Returns `Ok(None)` when the peer closed the connection cleanly at a frame
/// boundary, which is how "no reply" is expressed.
pub async fn read_frame<R>(reader: &mut R) -> Result<Option<Vec<u8>>, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    }

    let len = u32::from_be_bytes(len_buf) as usize;
    if len > MAX_FRAME_BYTES {
        return Err(ProtocolError::FrameTooLarge {
            size: len,
            max: MAX_FRAME_BYTES,
        });
    }

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await?;
    Ok(Some(payload))
}

/// Serialize and frame one message
pub async fn write_message<W, T>(writer: &mut W, message: &T) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let payload = serde_json::to_vec(message)?;
    write_frame(writer, &payload).await
}

/// Read and decode one message, `Ok(None)` on clean EOF
pub async fn read_message<R, T>(reader: &mut R) -> Result<Option<T>, ProtocolError>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    match read_frame(reader).await? {
        Some(payload) => Ok(Some(serde_json::from_slice(&payload)?)),
        None => Ok(None),
    }
}
