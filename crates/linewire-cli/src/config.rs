//! Client configuration

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

/// Environment variable holding the default endpoint
pub const ENDPOINT_ENV: &str = "LINEWIRE_ENDPOINT";

const DEFAULT_ENDPOINT: &str = "127.0.0.1:7777";
const DEFAULT_LOG_FILTER: &str = "info";

/// Where to connect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// TCP `host:port`
    Tcp(String),
    /// Unix socket path
    Unix(PathBuf),
}

impl Endpoint {
    /// Parse `unix:<path>` or `host:port`
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if let Some(path) = value.strip_prefix("unix:") {
            if path.is_empty() {
                bail!("Unix endpoint is missing a socket path");
            }
            return Ok(Endpoint::Unix(PathBuf::from(path)));
        }
        if value.is_empty() {
            bail!("Endpoint is empty");
        }
        if !value.contains(':') {
            bail!("TCP endpoint must be host:port, got {}", value);
        }
        Ok(Endpoint::Tcp(value.to_string()))
    }
}

/// Configuration for the linewire client
#[derive(Debug, Clone, Parser)]
#[command(
    name = "linewire",
    about = "Send stdin lines to an endpoint and print the lines it sends back",
    version
)]
pub struct ClientConfig {
    /// Endpoint to connect to: `host:port` or `unix:/path/to.sock`
    #[arg(
        value_name = "ENDPOINT",
        env = ENDPOINT_ENV,
        default_value = DEFAULT_ENDPOINT,
        value_parser = Endpoint::parse
    )]
    pub endpoint: Endpoint,

    /// tracing filter directives (RUST_LOG syntax)
    #[arg(long, env = "RUST_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,
}
