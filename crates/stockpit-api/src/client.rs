// Hand-crafted async HTTP client for stockpit reference-data backends.
//
// Every managed collection exposes the same REST surface:
//   POST {base}/filter   server-side filtered listing
//   GET  {base}          full listing (client-side filter collections)
//   POST {base}          create
//   PUT  {base}/{key}    update one
//   PUT  {base}          bulk replace (settings)
//   DELETE {base}/{key}  delete one
//
// Auth: Authorization: Bearer <token> on every request.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::credentials::CredentialProvider;
use crate::error::Error;
use crate::transport::TransportConfig;

// ── Error response shape from the backend ────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for a stockpit backend.
///
/// Stateless beyond its connection pool: it holds no entity data and
/// never mutates the injected credential. One instance is shared by
/// every store and controller in the process.
pub struct ResourceClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl ResourceClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a backend base URL, credential provider, and transport
    /// config.
    pub fn new(
        base_url: &str,
        credentials: Arc<dyn CredentialProvider>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(
            http,
            Self::normalize_base_url(base_url)?,
            credentials,
        ))
    }

    /// Wrap an existing `reqwest::Client` (used by tests).
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            http,
            base_url,
            credentials,
        }
    }

    /// Ensure the base URL ends with a single trailing slash so joining
    /// collection paths works uniformly.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── URL / credential helpers ─────────────────────────────────────

    /// Join a collection path (e.g. `"/product-brands"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Resolve the bearer token, failing fast before any network call.
    fn token(&self) -> Result<SecretString, Error> {
        self.credentials.bearer_token().ok_or(Error::Unauthenticated)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get_raw(&self, path: &str) -> Result<reqwest::Response, Error> {
        let token = self.token()?;
        let url = self.url(path)?;
        debug!("GET {url}");

        Ok(self
            .http
            .get(url)
            .bearer_auth(token.expose_secret())
            .send()
            .await?)
    }

    async fn post_raw<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, Error> {
        let token = self.token()?;
        let url = self.url(path)?;
        debug!("POST {url}");

        Ok(self
            .http
            .post(url)
            .bearer_auth(token.expose_secret())
            .json(body)
            .send()
            .await?)
    }

    async fn put_raw<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, Error> {
        let token = self.token()?;
        let url = self.url(path)?;
        debug!("PUT {url}");

        Ok(self
            .http
            .put(url)
            .bearer_auth(token.expose_secret())
            .json(body)
            .send()
            .await?)
    }

    async fn delete_raw(&self, path: &str) -> Result<reqwest::Response, Error> {
        let token = self.token()?;
        let url = self.url(path)?;
        debug!("DELETE {url}");

        Ok(self
            .http
            .delete(url)
            .bearer_auth(token.expose_secret())
            .send()
            .await?)
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    /// Like [`handle_response`](Self::handle_response), but the contract
    /// guarantees callers a sequence: a 2xx body that is not a JSON array
    /// normalizes to an empty `Vec` instead of failing.
    async fn handle_sequence<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<Vec<T>, Error> {
        let value: serde_json::Value = Self::handle_response(resp).await?;
        match value {
            serde_json::Value::Array(_) => {
                serde_json::from_value(value.clone()).map_err(|e| Error::Deserialization {
                    message: e.to_string(),
                    body: value.to_string(),
                })
            }
            other => {
                debug!("non-sequence list body normalized to empty: {other}");
                Ok(Vec::new())
            }
        }
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|e| e.message.or(e.error))
            .unwrap_or_else(|| format!("request failed with HTTP status {}", status.as_u16()));

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Server-side filtered listing: `POST {base}/filter` with the
    /// criteria as a JSON object. An empty object lists everything.
    pub async fn filter<T: DeserializeOwned>(
        &self,
        base: &str,
        criteria: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Vec<T>, Error> {
        let resp = self
            .post_raw(&format!("{}/filter", base.trim_end_matches('/')), criteria)
            .await?;
        Self::handle_sequence(resp).await
    }

    /// Full listing: `GET {base}`. Used by collections the backend does
    /// not expose a filter endpoint for; filtering happens client-side.
    pub async fn list<T: DeserializeOwned>(&self, base: &str) -> Result<Vec<T>, Error> {
        let resp = self.get_raw(base).await?;
        Self::handle_sequence(resp).await
    }

    /// Create an entity from its editable fields: `POST {base}`.
    pub async fn create<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        base: &str,
        body: &B,
    ) -> Result<T, Error> {
        let resp = self.post_raw(base, body).await?;
        Self::handle_response(resp).await
    }

    /// Update one entity: `PUT {base}/{key}`.
    pub async fn update<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        base: &str,
        key: &str,
        body: &B,
    ) -> Result<T, Error> {
        let resp = self
            .put_raw(&format!("{}/{key}", base.trim_end_matches('/')), body)
            .await?;
        Self::handle_response(resp).await
    }

    /// Delete one entity: `DELETE {base}/{key}`.
    pub async fn remove(&self, base: &str, key: &str) -> Result<(), Error> {
        let resp = self
            .delete_raw(&format!("{}/{key}", base.trim_end_matches('/')))
            .await?;
        Self::handle_empty(resp).await
    }

    /// Bulk replace an entire collection: `PUT {base}` with an array
    /// body. Settings-only semantics.
    pub async fn replace_all<B: Serialize + Sync>(
        &self,
        base: &str,
        records: &[B],
    ) -> Result<(), Error> {
        let resp = self.put_raw(base, &records).await?;
        Self::handle_empty(resp).await
    }
}
