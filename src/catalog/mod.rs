//! Catalog access: where candidates come from and how the service authenticates for them.

mod credentials;
mod spotify;

pub use credentials::{AccessToken, ClientCredentialsProvider, CredentialProvider, StaticToken};
pub use spotify::SpotifyCatalog;

use crate::models::{Candidate, CompetitorKind};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog authentication failed: {0}")]
    Auth(String),

    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Catalog response could not be decoded: {0}")]
    Decode(String),
}

/// Supplies raw candidates for an origin (artist id for albums, playlist id for tracks).
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// All candidates across every page, in catalog order.
    async fn fetch_candidates(
        &self,
        origin: &str,
        kind: CompetitorKind,
    ) -> Result<Vec<Candidate>, CatalogError>;
}

/// HTTP client shared by the catalog and the token provider. Every request is bounded
/// by `timeout`, so a stalled token endpoint cannot hold the token lock forever.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, CatalogError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}
