//! Configuration for the Gavel API server.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};

use crate::{GavelError, Result, constants};

/// Configuration for a Gavel server instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on for the REST API.
    pub listen_addr: SocketAddr,
}

impl ServerConfig {
    /// Build a config from the environment, falling back to defaults.
    ///
    /// # Errors
    /// Returns [`GavelError::Configuration`] if `GAVEL_LISTEN_ADDR` is set
    /// but does not parse as a socket address.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(addr) = std::env::var(constants::LISTEN_ADDR_ENV) {
            config.listen_addr = addr.parse().map_err(|_| {
                GavelError::Configuration(format!("invalid listen address: {addr}"))
            })?;
        }
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::new(
                IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                constants::DEFAULT_API_PORT,
            ),
        }
    }
}
