use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use clap::Parser;

use crate::config::{Config, LogFormat};

/// Eastern Time MCP Server
///
/// Serves the current America/New_York time as an ISO 8601 timestamp over a
/// JSON-RPC style HTTP endpoint.
///
/// ## Endpoints
/// - `GET /` returns `{"timestamp": "..."}`
/// - `GET /?method=tools/call&name=get_eastern_time` dispatches from the query string
/// - `POST /` accepts a JSON-RPC request body
///
/// ## Example
/// ```bash
/// curl -s -X POST http://localhost:8000/ \
///   -H 'Content-Type: application/json' \
///   -d '{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"get_eastern_time"}}'
/// ```
///
/// ## Environment Variables
/// - `RUST_LOG`: Controls logging verbosity (trace, debug, info, warn, error)
#[derive(Parser, Debug, Clone)]
#[command(name = "mcp-server-eastern-time")]
#[command(about = "An HTTP JSON-RPC server returning the current US Eastern time")]
#[command(version)]
#[command(
    long_about = "A Model Context Protocol (MCP) style server that exposes a single tool, get_eastern_time, \nover HTTP. Timestamps are ISO 8601 with the live America/New_York UTC offset."
)]
pub struct Cli {
    /// Address to bind the HTTP listener to
    #[arg(long, default_value = "0.0.0.0", value_name = "HOST")]
    pub host: IpAddr,

    /// Port to bind the HTTP listener to
    #[arg(short, long, default_value_t = 8000, value_name = "PORT")]
    pub port: u16,

    /// Milliseconds to wait before returning a tool result
    #[arg(long, default_value_t = 100, value_name = "MILLIS")]
    pub tool_delay_ms: u64,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Parse CLI arguments and convert to configuration
    pub fn parse_config() -> Config {
        Self::parse().into_config()
    }

    pub fn into_config(self) -> Config {
        Config {
            listen_addr: SocketAddr::new(self.host, self.port),
            tool_delay: Duration::from_millis(self.tool_delay_ms),
            log_format: self.log_format,
        }
    }
}
