use crate::types::TabId;
use thiserror::Error;

/// Tab source (browser backend) related errors
#[derive(Debug, Clone, Error)]
pub enum TabSourceError {
    #[error("Browser endpoint unreachable: {details}")]
    Unreachable { details: String },

    #[error("Invalid response from browser: {details}")]
    InvalidResponse { details: String },

    #[error("Tab not found: {id}")]
    TabNotFound { id: TabId },

    #[error("Tab operation rejected: {details}")]
    Rejected { details: String },

    #[error("Internal tab source error: {details}")]
    Internal { details: String },
}

/// Socket transport related errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Malformed message: {source}")]
    Malformed {
        #[from]
        source: serde_json::Error,
    },

    #[error("Frame of {size} bytes exceeds the {max} byte limit")]
    FrameTooLarge { size: usize, max: usize },

    #[error("Connection closed before a reply arrived")]
    ConnectionClosed,
}
