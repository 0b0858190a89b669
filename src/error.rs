//! Errors surfaced at the request boundary, with their HTTP status.

use crate::catalog::CatalogError;
use crate::models::BracketError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Bracket(#[from] BracketError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Unknown competitor type {0:?} (expected \"album\" or \"track\")")]
    UnknownCompetitorType(String),

    #[error("Missing or malformed catalog id in \"from\"")]
    MissingOrigin,

    #[error("Unknown selection {0:?} (expected \"seeded\" or \"unordered\")")]
    InvalidSelection(String),

    #[error("Malformed query string: {0}")]
    InvalidQuery(String),
}

impl ServiceError {
    /// Client mistakes map to 4xx; malformed catalog data and upstream failures to 5xx.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Bracket(BracketError::InvalidCandidate) => 500,
            ServiceError::Bracket(_) => 400,
            ServiceError::Catalog(_) => 502,
            ServiceError::UnknownCompetitorType(_) => 404,
            ServiceError::MissingOrigin
            | ServiceError::InvalidSelection(_)
            | ServiceError::InvalidQuery(_) => 400,
        }
    }
}

/// Catalog ids are base62; anything else would be spliced into a URL path.
pub fn validate_origin(origin: &str) -> Result<&str, ServiceError> {
    let origin = origin.trim();
    if origin.is_empty() || !origin.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ServiceError::MissingOrigin);
    }
    Ok(origin)
}
