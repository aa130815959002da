//! todo-mcp — a SQLite-backed todo list server for the Model Context
//! Protocol, speaking newline-delimited JSON-RPC on stdin/stdout.
//!
//! Logs go to stderr (stdout carries protocol frames); filter with
//! `RUST_LOG`, e.g. `RUST_LOG=todomcp=debug`.

#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};

use todo_mcp_server::{Server, ToolRegistry};
use todo_mcp_store::TodoStore;
use todo_mcp_transport::StdioTransport;

/// Serve a todo list over MCP on stdin/stdout.
#[derive(Parser)]
#[command(name = "todo-mcp")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the todo database (created on first use).
    #[arg(long, env = "TODO_MCP_DB")]
    db_path: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let db_path = cli.db_path.unwrap_or_else(default_db_path);

    let store = match TodoStore::open(&db_path) {
        Ok(store) => store,
        Err(e) => {
            error!("failed to open todo store at {}: {e}", db_path.display());
            return ExitCode::FAILURE;
        }
    };
    info!("serving todos from {}", store.db_path().display());

    let registry = ToolRegistry::with_store(Arc::new(store));
    let server = Server::new("todo-mcp", env!("CARGO_PKG_VERSION"), registry);
    let mut transport = StdioTransport::stdio();

    match server.run(&mut transport) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("transport failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Default database location under the platform data directory.
fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("todo-mcp")
        .join("todo-mcp.db")
}
