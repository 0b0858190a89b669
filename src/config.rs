//! Server configuration read from environment variables.

use crate::models::DedupPolicy;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Eq, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub client_id: String,
    pub client_secret: String,
    pub api_url: String,
    pub token_url: String,
    pub market: String,
    /// Origins that get an `Access-Control-Allow-Origin` echo.
    pub allowed_origins: Vec<String>,
    pub dedup_policy: DedupPolicy,
    /// How often the background task touches the catalog token.
    pub token_refresh: Duration,
    /// Upper bound on any single catalog or token request.
    pub catalog_timeout: Duration,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_api_url() -> String {
    "https://api.spotify.com/v1".to_string()
}

fn default_token_url() -> String {
    "https://accounts.spotify.com/api/token".to_string()
}

fn default_market() -> String {
    "US".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

fn default_token_refresh_secs() -> u64 {
    300
}

fn default_catalog_timeout_secs() -> u64 {
    10
}

/// Positive number of seconds.
fn parse_secs(var: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or(ConfigError::Invalid { var, value })
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let port = match get("PORT") {
            Some(p) => p
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { var: "PORT", value: p })?,
            None => default_port(),
        };
        let dedup_policy = match get("DEDUP_POLICY") {
            Some(p) => p
                .parse()
                .map_err(|value| ConfigError::Invalid { var: "DEDUP_POLICY", value })?,
            None => DedupPolicy::default(),
        };
        let refresh_secs = match get("TOKEN_REFRESH_SECS") {
            Some(s) => parse_secs("TOKEN_REFRESH_SECS", s)?,
            None => default_token_refresh_secs(),
        };
        let timeout_secs = match get("CATALOG_TIMEOUT_SECS") {
            Some(s) => parse_secs("CATALOG_TIMEOUT_SECS", s)?,
            None => default_catalog_timeout_secs(),
        };
        let allowed_origins = get("ALLOWED_ORIGINS")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_else(default_allowed_origins);

        Ok(Self {
            host: get("HOST").unwrap_or_else(default_host),
            port,
            client_id: required("SPOTIFY_MADNESS_ID")?,
            client_secret: required("SPOTIFY_MADNESS_SECRET")?,
            api_url: get("CATALOG_API_URL").unwrap_or_else(default_api_url),
            token_url: get("CATALOG_TOKEN_URL").unwrap_or_else(default_token_url),
            market: get("CATALOG_MARKET").unwrap_or_else(default_market),
            allowed_origins,
            dedup_policy,
            token_refresh: Duration::from_secs(refresh_secs),
            catalog_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn allows_origin(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == origin)
    }
}
