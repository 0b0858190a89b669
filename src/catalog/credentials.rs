//! Access tokens for the catalog API.

use crate::catalog::CatalogError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Tokens are treated as expired this long before the catalog says so.
const EXPIRY_MARGIN: Duration = Duration::from_secs(30);

/// Bearer token for catalog requests.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

/// Shared, thread-safe source of catalog credentials.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// A token believed to be valid, acquiring a new one if needed.
    async fn current_token(&self) -> Result<AccessToken, CatalogError>;

    /// Forget the current token (e.g. after the catalog rejected it).
    async fn invalidate(&self);
}

/// A fixed, pre-issued token. Invalidation is a no-op.
#[derive(Clone, Debug)]
pub struct StaticToken(AccessToken);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(AccessToken::new(token))
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn current_token(&self) -> Result<AccessToken, CatalogError> {
        Ok(self.0.clone())
    }

    async fn invalidate(&self) {}
}

struct CachedToken {
    token: AccessToken,
    expires_at: Instant,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// OAuth2 client-credentials flow with an in-memory token cache, refreshed on demand.
pub struct ClientCredentialsProvider {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    cached: RwLock<Option<CachedToken>>,
}

impl ClientCredentialsProvider {
    pub fn new(
        http: reqwest::Client,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            http,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            cached: RwLock::new(None),
        }
    }

    async fn request_token(&self) -> Result<CachedToken, CatalogError> {
        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Auth(format!("token endpoint returned {}", status)));
        }
        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Auth(format!("unreadable token response: {}", e)))?;
        log::info!("Acquired catalog access token (expires in {}s)", body.expires_in);
        let lifetime = Duration::from_secs(body.expires_in).saturating_sub(EXPIRY_MARGIN);
        Ok(CachedToken {
            token: AccessToken::new(body.access_token),
            expires_at: Instant::now() + lifetime,
        })
    }
}

fn still_valid(cached: &Option<CachedToken>) -> Option<AccessToken> {
    cached
        .as_ref()
        .filter(|c| Instant::now() < c.expires_at)
        .map(|c| c.token.clone())
}

#[async_trait]
impl CredentialProvider for ClientCredentialsProvider {
    async fn current_token(&self) -> Result<AccessToken, CatalogError> {
        if let Some(token) = still_valid(&*self.cached.read().await) {
            return Ok(token);
        }
        let mut guard = self.cached.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(token) = still_valid(&guard) {
            return Ok(token);
        }
        let fresh = self.request_token().await?;
        let token = fresh.token.clone();
        *guard = Some(fresh);
        Ok(token)
    }

    async fn invalidate(&self) {
        *self.cached.write().await = None;
    }
}
