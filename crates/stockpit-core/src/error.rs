use thiserror::Error;

/// Error type for the core resource-management pattern.
///
/// Wraps the API client's taxonomy and adds the local, pre-network
/// validation failure that never reaches the wire.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Backend or transport failure, forwarded from the resource client.
    #[error(transparent)]
    Api(#[from] stockpit_api::Error),

    /// Local field-level validation failure; no request was issued.
    #[error("{field}: {message}")]
    Validation { field: String, message: String },
}

impl CoreError {
    /// The message to surface to the user.
    ///
    /// Backend errors show the server-provided message when one exists
    /// (e.g. `"in use"` from a 500 body), not the full diagnostic wrapper.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(stockpit_api::Error::Api { message, .. }) => message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns `true` if the user should be sent to a login entry point.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_unauthenticated())
    }
}
