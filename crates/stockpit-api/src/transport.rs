// Shared transport configuration for building reqwest::Client instances.
//
// Timeout and TLS settings live here so every ResourceClient is built
// the same way, and so a hung backend can never pin a loading flag
// forever.

use std::time::Duration;

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout. A request that exceeds it fails with a
    /// connection error instead of hanging the caller's in-flight lock.
    pub timeout: Duration,
    /// Accept any certificate (for self-hosted backends with
    /// self-signed certs).
    pub danger_accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            danger_accept_invalid_certs: false,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("stockpit/", env!("CARGO_PKG_VERSION")));

        if self.danger_accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder
            .build()
            .map_err(|e| crate::error::Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}
