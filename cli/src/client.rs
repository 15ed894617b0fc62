//! Socket client
//!
//! Each call opens a fresh connection, sends one framed request, and
//! reads the single reply. The daemon never replies to actions it does
//! not recognize, so a clean EOF here is an error: every request this
//! client sends is a known one.

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use tab_roulette_core::protocol::{read_message, write_message};
use tokio::net::UnixStream;

pub struct DaemonClient {
    socket_path: PathBuf,
}

impl DaemonClient {
    pub fn new(socket_path: PathBuf) -> Self {
        Self { socket_path }
    }

    /// One conversation with the daemon.
    pub async fn call<R, T>(&self, request: &R) -> anyhow::Result<T>
    where
        R: Serialize,
        T: DeserializeOwned,
    {
        let mut stream = UnixStream::connect(&self.socket_path).await.with_context(|| {
            format!(
                "failed to connect to {} (is tab-roulette-daemon running?)",
                self.socket_path.display()
            )
        })?;

        write_message(&mut stream, request)
            .await
            .context("failed to send the request")?;

        read_message(&mut stream)
            .await
            .context("failed to read the reply")?
            .ok_or_else(|| anyhow::anyhow!("the daemon closed the connection without replying"))
    }
}
