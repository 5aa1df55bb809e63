//! Server listen configuration.
//!
//! Each setting is resolved as env var, then the `[server]` section of
//! `repository.toml`, then the default:
//! - `HOST`: bind address (default: 0.0.0.0)
//! - `PORT`: bind port (default: 8089)

use std::net::SocketAddr;

use anyhow::{Context, Result};

use crate::db::repo_config::ServerSection;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8089;

/// Where the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Resolve from `HOST`/`PORT` over the optional file section.
    pub fn from_env(file: Option<&ServerSection>) -> Self {
        Self::layered(
            std::env::var("HOST").ok(),
            std::env::var("PORT").ok(),
            file,
        )
    }

    /// An unparsable `PORT` is ignored rather than fatal.
    fn layered(host: Option<String>, port: Option<String>, file: Option<&ServerSection>) -> Self {
        let file = file.cloned().unwrap_or_default();
        Self {
            host: host.or(file.host).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: port
                .and_then(|p| p.parse().ok())
                .or(file.port)
                .unwrap_or(DEFAULT_PORT),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}
