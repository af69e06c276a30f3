//! Async HTTP client for stockpit inventory reference-data backends.
//!
//! Every managed collection (brands, units, roles, taxes, settings)
//! shares one REST shape; [`ResourceClient`] implements it once:
//! list/filter, create, update, bulk replace, and delete, each carrying
//! the injected bearer credential. Responses normalize into
//! `Result<T, Error>` — callers never see a raw HTTP response.
//!
//! The client is stateless: it owns a connection pool and a
//! [`CredentialProvider`], nothing else. `stockpit-core` layers the
//! stores and controllers on top.

pub mod client;
pub mod credentials;
pub mod error;
pub mod transport;

pub use client::ResourceClient;
pub use credentials::{CredentialProvider, NoCredential, StaticToken};
pub use error::Error;
pub use transport::TransportConfig;
