//! System-wide constants for the Gavel bidding service.

/// Default API listen port.
pub const DEFAULT_API_PORT: u16 = 3000;

/// Environment variable overriding the listen address.
pub const LISTEN_ADDR_ENV: &str = "GAVEL_LISTEN_ADDR";

/// Maximum decimal precision for monetary amounts (2 decimal places).
pub const MONEY_PRECISION: u32 = 2;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service name.
pub const SERVICE_NAME: &str = "Gavel";
