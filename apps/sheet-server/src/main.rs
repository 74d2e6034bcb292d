//! Main REST API server for the spreadsheet operations service.
//!
//! Wires the workbook store, the runtime command loop, and the REST API
//! together with configuration parsing and graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{error, info};

use sheet_ops_api::{router::Router, server::Server};
use sheet_ops_core::{config::ServiceConfig, store::WorkbookStore};
use sheet_ops_runtime::Runtime;

/// Command-line arguments for the spreadsheet server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Maximum operations accepted in one dimension batch
    #[arg(long, default_value_t = 100)]
    max_batch_operations: usize,

    /// Default row count for new sheets
    #[arg(long, default_value_t = 1000)]
    default_rows: u32,

    /// Default column count for new sheets
    #[arg(long, default_value_t = 26)]
    default_columns: u32,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    request_timeout_ms: u64,

    /// Response timeout in milliseconds
    #[arg(long, default_value_t = 10000)]
    response_timeout_ms: u64,

    /// Base URL used when rendering resource links
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    let base_url = args
        .base_url
        .clone()
        .unwrap_or_else(|| format!("http://{}:{}", args.host, args.port));

    let config = Arc::new(ServiceConfig {
        max_batch_operations: args.max_batch_operations,
        default_rows: args.default_rows,
        default_columns: args.default_columns,
        request_timeout_ms: args.request_timeout_ms,
        response_timeout_ms: args.response_timeout_ms,
        base_url,
    });

    // Channel between the API layer and the runtime loop
    let (command_tx, command_rx) = mpsc::channel(1000);

    // Spawn the runtime loop; it owns the store
    let store = WorkbookStore::new();
    let runtime = Runtime::new(store, (*config).clone(), command_rx);
    tokio::spawn(runtime.run());

    let router = Router::new(config.clone(), command_tx);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", args.host, args.port))?;
    let server = Server::new(addr, router);

    info!("Starting spreadsheet operations server");
    info!("  Host: {}", args.host);
    info!("  Port: {}", args.port);
    info!("  Max batch operations: {}", args.max_batch_operations);
    info!(
        "  Default grid: {} rows x {} columns",
        args.default_rows, args.default_columns
    );
    info!("  Request timeout: {} ms", args.request_timeout_ms);
    info!("  Response timeout: {} ms", args.response_timeout_ms);

    // Start server with graceful shutdown
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.serve().await {
            error!("Server error: {}", e);
        }
    });

    // Wait for Ctrl+C
    signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutting down server");
    server_handle.abort();

    Ok(())
}
