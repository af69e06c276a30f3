use thiserror::Error;

/// Top-level error type for the `stockpit-api` crate.
///
/// Covers every failure mode of the resource client: missing credential,
/// transport, non-2xx backend responses, and malformed bodies.
/// `stockpit-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Credential ──────────────────────────────────────────────────
    /// No bearer credential available; the request was never issued.
    #[error("no credential available -- sign in required")]
    Unauthenticated,

    // ── Transport ───────────────────────────────────────────────────
    /// Network-level failure: no response received (refused, DNS, timeout).
    #[error("connection error")]
    Connection(#[source] reqwest::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Backend ─────────────────────────────────────────────────────
    /// Non-2xx response from the backend. `message` is taken from the
    /// body's `message` or `error` field when present.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the caller should be sent to a login entry point.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// Returns `true` if no response was received at all.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// HTTP status of a backend error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Connection(e)
    }
}
