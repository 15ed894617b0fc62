//! Command line client for Tab Roulette

mod client;
mod render;

use clap::{Parser, Subcommand};
use client::DaemonClient;
use std::path::PathBuf;
use std::process::ExitCode;
use tab_roulette_core::protocol::{
    default_socket_path, CloseTabResponse, LastClosedInfoResponse, ReopenTabResponse, Request,
    TabCountResponse,
};

/// Close a random tab, with a five minute undo.
#[derive(Parser, Debug)]
#[command(name = "tab-roulette", version)]
#[command(about = "Close a random tab, with undo", long_about = None)]
struct Cli {
    /// Daemon socket path.
    #[arg(long, global = true)]
    socket: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Close one randomly chosen tab in the current window.
    Close,
    /// Reopen the most recently closed tab.
    Undo,
    /// Show the open tab count and what undo would restore.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let client = DaemonClient::new(cli.socket.unwrap_or_else(default_socket_path));

    match cli.command {
        Commands::Close => close(&client).await,
        Commands::Undo => undo(&client).await,
        Commands::Status => status(&client).await,
    }
}

async fn close(client: &DaemonClient) -> anyhow::Result<ExitCode> {
    let response: CloseTabResponse = client.call(&Request::CloseRandomTab).await?;
    match response {
        CloseTabResponse::Closed { closed_tab, .. } => {
            for line in render::closed_tab_lines(&closed_tab) {
                println!("{line}");
            }
            Ok(ExitCode::SUCCESS)
        }
        CloseTabResponse::Failed { reason, error, .. } => {
            eprintln!("{}", render::close_failure_line(reason));
            if let Some(detail) = error {
                eprintln!("  {detail}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn undo(client: &DaemonClient) -> anyhow::Result<ExitCode> {
    let response: ReopenTabResponse = client.call(&Request::ReopenLastTab).await?;
    match response {
        ReopenTabResponse::Reopened { reopened_tab, .. } => {
            for line in render::reopened_tab_lines(&reopened_tab) {
                println!("{line}");
            }
            Ok(ExitCode::SUCCESS)
        }
        ReopenTabResponse::Failed { reason, error, .. } => {
            eprintln!("{}", render::reopen_failure_line(reason));
            if let Some(detail) = error {
                eprintln!("  {detail}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn status(client: &DaemonClient) -> anyhow::Result<ExitCode> {
    let mut code = ExitCode::SUCCESS;

    let counted: TabCountResponse = client.call(&Request::GetTabCount).await?;
    match counted {
        TabCountResponse::Counted { tab_count, .. } => {
            println!("{}", render::tab_count_line(tab_count));
        }
        TabCountResponse::Failed { error, .. } => {
            eprintln!("Error getting tab info");
            if let Some(detail) = error {
                eprintln!("  {detail}");
            }
            code = ExitCode::FAILURE;
        }
    }

    let info: LastClosedInfoResponse = client.call(&Request::GetLastClosedTabInfo).await?;
    match info {
        LastClosedInfoResponse::Present { tab, .. } => {
            println!("{}", render::undo_status_line(&tab, chrono::Utc::now()));
        }
        LastClosedInfoResponse::Absent { .. } => {
            println!("Nothing to undo");
        }
    }

    Ok(code)
}
