mod cli;
mod config;
mod core;
mod server;
mod utils;

use cli::Cli;
use utils::logging;

/// Eastern Time MCP Server
///
/// Serves the current America/New_York time over HTTP:
/// - Tools: `get_eastern_time` via `tools/call`
/// - Shortcuts: `GET /` and `GET /?method=...`
///
/// Usage: RUST_LOG=info cargo run --bin mcp-server-eastern-time -- --port 8000
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse CLI arguments
    let config = Cli::parse_config();

    // Initialize logging based on environment
    logging::init_logging(config.log_format)?;

    tracing::info!("Starting Eastern Time MCP server");

    if let Err(e) = server::run(config).await {
        tracing::error!("Failed to run Eastern Time MCP server: {}", e);
        return Err(e.into());
    }

    Ok(())
}
