//! Runtime configuration
//!
//! Credentials and client identity are resolved once at startup and passed
//! explicitly into the components that need them. Missing credentials are a
//! startup error, never a runtime one.

use crate::error::{Error, Result};
use std::net::{IpAddr, Ipv4Addr, UdpSocket};
use std::path::PathBuf;

/// Environment variable holding the Glassdoor partner id (`t.p`)
pub const ENV_PARTNER_ID: &str = "GLASSDOOR_ID";

/// Environment variable holding the Glassdoor partner key (`t.k`)
pub const ENV_PARTNER_KEY: &str = "GLASSDOOR_KEY";

/// Optional override for the provider base URL (used by tests)
pub const ENV_BASE_URL: &str = "GLASSDOOR_API_URL";

/// Default provider endpoint
pub const DEFAULT_BASE_URL: &str = "http://api.glassdoor.com/api/api.htm";

/// Fixed user agent sent with every request
pub const USER_AGENT: &str = "Mozilla/5.0";

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Partner id credential (`t.p` query parameter)
    pub partner_id: String,
    /// Partner key credential (`t.k` query parameter)
    pub partner_key: String,
    /// Provider endpoint
    pub base_url: String,
    /// Local address reported to the provider (`userip`)
    pub client_ip: String,
    /// User agent reported to the provider
    pub user_agent: String,
    /// Path of the DuckDB document store
    pub store_path: PathBuf,
    /// Path of the final Parquet dataset
    pub output_path: PathBuf,
    /// Harvest worker count
    pub workers: usize,
}

impl Config {
    /// Resolve configuration from the process environment.
    ///
    /// Fails fast if either credential is absent.
    pub fn from_env() -> Result<Self> {
        let partner_id = require_env(ENV_PARTNER_ID)?;
        let partner_key = require_env(ENV_PARTNER_KEY)?;
        let base_url =
            std::env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            partner_id,
            partner_key,
            base_url,
            client_ip: local_ip().to_string(),
            user_agent: USER_AGENT.to_string(),
            store_path: PathBuf::from("data/employers.duckdb"),
            output_path: PathBuf::from("data/employers.parquet"),
            workers: default_workers(),
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::missing_env(name)),
    }
}

/// Harvest worker count: available parallelism minus one, at least one.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get().saturating_sub(1))
        .unwrap_or(1)
        .max(1)
}

/// Resolve the local address the provider sees as `userip`.
///
/// Opens a UDP socket towards a public address; no packet is actually sent.
/// Falls back to the loopback address when the host has no route.
pub fn local_ip() -> IpAddr {
    UdpSocket::bind("0.0.0.0:0")
        .and_then(|socket| {
            socket.connect("8.8.8.8:80")?;
            socket.local_addr()
        })
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}
