// ── Credential provision ──
//
// The bearer token is process-wide read-only state: one provider is
// injected into the ResourceClient at construction and consulted on
// every request. Nothing else in the workspace reads or mutates it.

use secrecy::SecretString;

/// Read-only source of the bearer credential attached to every request.
///
/// Returning `None` makes the client fail fast with
/// [`Error::Unauthenticated`](crate::Error::Unauthenticated) before any
/// network traffic.
pub trait CredentialProvider: Send + Sync {
    fn bearer_token(&self) -> Option<SecretString>;
}

/// Fixed token known at construction time (config file, env, or flag).
pub struct StaticToken(SecretString);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    pub fn from_secret(token: SecretString) -> Self {
        Self(token)
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<SecretString> {
        Some(self.0.clone())
    }
}

/// Provider with no credential; every request fails fast.
pub struct NoCredential;

impl CredentialProvider for NoCredential {
    fn bearer_token(&self) -> Option<SecretString> {
        None
    }
}
