use std::net::SocketAddr;
use std::time::Duration;

use clap::ValueEnum;

/// Log output style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// Delay applied before a tool result is returned
    pub tool_delay: Duration,
    pub log_format: LogFormat,
}
