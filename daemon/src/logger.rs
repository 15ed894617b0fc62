/// Centralized logging configuration for the daemon

use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Log level used when RUST_LOG is not set (trace, debug, info, warn, error)
    pub level: String,

    /// Include target module paths
    pub include_targets: bool,

    /// Include thread IDs
    pub include_thread_ids: bool,

    /// Log file path, stderr when unset
    pub log_file_path: Option<PathBuf>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            include_targets: true,
            include_thread_ids: false,
            log_file_path: None,
        }
    }
}

/// Daemon logger
pub struct DaemonLogger;

impl DaemonLogger {
    /// Initialize the global logger
    ///
    /// RUST_LOG takes precedence over the configured level. Logs go to
    /// stderr so the socket protocol on stdout stays untouched by shells
    /// that capture it.
    pub fn init(config: LoggerConfig) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))?;

        match config.log_file_path {
            Some(path) => {
                let file = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)?;
                let file_layer = fmt::layer()
                    .with_target(config.include_targets)
                    .with_thread_ids(config.include_thread_ids)
                    .with_ansi(false)
                    .with_writer(std::sync::Arc::new(file));
                tracing::subscriber::set_global_default(
                    tracing_subscriber::registry().with(filter).with(file_layer),
                )?;
            }
            None => {
                let console_layer = fmt::layer()
                    .with_target(config.include_targets)
                    .with_thread_ids(config.include_thread_ids)
                    .with_ansi(true)
                    .with_writer(std::io::stderr);
                tracing::subscriber::set_global_default(
                    tracing_subscriber::registry().with(filter).with(console_layer),
                )?;
            }
        }

        tracing::info!("Logging initialized with level: {}", config.level);

        Ok(())
    }

    /// Initialize with default configuration
    pub fn init_default() -> std::result::Result<(), Box<dyn std::error::Error>> {
        Self::init(LoggerConfig::default())
    }
}
