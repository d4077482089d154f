//! Server Config

use std::time::Duration;

use clap::Args;
use shopfront_app::timeouts;

/// Server runtime network settings.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0", global = true)]
    pub host: String,

    /// Server port; each service has its own default
    #[arg(short, long, env = "SERVER_PORT", global = true)]
    pub port: Option<u16>,

    /// Include internal error descriptions in 5xx responses
    #[arg(long, env = "EXPOSE_ERROR_DETAILS", default_value_t = false, global = true)]
    pub expose_error_details: bool,

    /// Seconds in-flight requests get to finish after a shutdown signal; 0 waits indefinitely
    #[arg(long, env = "SHUTDOWN_GRACE_SECONDS", default_value_t = 30, global = true)]
    pub shutdown_grace_seconds: u64,
}

impl ServerRuntimeConfig {
    /// Get the socket address for binding.
    #[must_use]
    pub fn socket_addr(&self, default_port: u16) -> String {
        format!("{}:{}", self.host, self.port.unwrap_or(default_port))
    }

    #[must_use]
    pub fn shutdown_grace(&self) -> Option<Duration> {
        timeouts::from_secs(self.shutdown_grace_seconds)
    }
}
