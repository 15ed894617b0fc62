//! Unix socket server
//!
//! A connection carries exactly one conversation: the client sends one
//! framed request, the daemon sends at most one framed reply and closes.
//! Requests with unrecognized actions and malformed frames get no reply;
//! the client sees a clean EOF.

use anyhow::Context;
use roulette::{dispatch, RouletteController};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tab_roulette_core::errors::ProtocolError;
use tab_roulette_core::protocol::{read_message, write_message, Request};
use tokio::net::{UnixListener, UnixStream};
use tracing::{debug, info, warn};

/// Listening daemon endpoint.
///
/// Binding claims the socket path, replacing a stale socket file left by
/// an earlier run. Dropping the server removes the file again.
pub struct RouletteServer {
    socket_path: PathBuf,
    listener: UnixListener,
    controller: Arc<RouletteController>,
}

impl RouletteServer {
    /// Bind the socket and prepare to serve.
    pub fn bind(socket_path: &Path, controller: Arc<RouletteController>) -> anyhow::Result<Self> {
        if let Some(parent) = socket_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create socket directory {}", parent.display())
                })?;
            }
        }

        remove_stale_socket(socket_path)?;

        let listener = UnixListener::bind(socket_path)
            .with_context(|| format!("failed to bind socket {}", socket_path.display()))?;

        info!("Listening on {}", socket_path.display());

        Ok(Self {
            socket_path: socket_path.to_path_buf(),
            listener,
            controller,
        })
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Accept connections until the accept call itself fails.
    ///
    /// Each connection is served on its own task, so a slow browser call
    /// never blocks the accept loop.
    pub async fn serve(&self) -> anyhow::Result<()> {
        loop {
            let (stream, _addr) = self
                .listener
                .accept()
                .await
                .context("failed to accept connection")?;

            let controller = Arc::clone(&self.controller);
            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, controller).await {
                    warn!("Connection error: {}", e);
                }
            });
        }
    }

    /// Remove the socket file.
    pub fn cleanup(&self) {
        match std::fs::remove_file(&self.socket_path) {
            Ok(()) => info!("Removed socket {}", self.socket_path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Failed to remove socket {}: {}",
                self.socket_path.display(),
                e
            ),
        }
    }
}

impl Drop for RouletteServer {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.socket_path) {
            if e.kind() != io::ErrorKind::NotFound {
                debug!(
                    "Failed to remove socket {} on drop: {}",
                    self.socket_path.display(),
                    e
                );
            }
        }
    }
}

/// Serve one connection: one request in, at most one reply out.
async fn handle_connection(
    mut stream: UnixStream,
    controller: Arc<RouletteController>,
) -> Result<(), ProtocolError> {
    let request: Request = match read_message(&mut stream).await? {
        Some(request) => request,
        // The client connected and left without sending anything.
        None => return Ok(()),
    };

    debug!("Handling request: {:?}", request);

    match dispatch(&controller, request).await {
        Some(response) => write_message(&mut stream, &response).await,
        // Ignored action: close without replying.
        None => Ok(()),
    }
}

/// Remove a leftover socket file so the bind can succeed.
///
/// Refuses to delete anything that is not a socket, so a mistyped
/// `--socket` path never eats a regular file.
fn remove_stale_socket(path: &Path) -> anyhow::Result<()> {
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to stat {}", path.display()));
        }
    };

    {
        use std::os::unix::fs::FileTypeExt;
        if !metadata.file_type().is_socket() {
            anyhow::bail!("{} exists and is not a socket", path.display());
        }
    }

    std::fs::remove_file(path)
        .with_context(|| format!("failed to remove stale socket {}", path.display()))?;
    debug!("Removed stale socket {}", path.display());
    Ok(())
}
