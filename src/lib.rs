//! Madness bracket service: library with models, bracket logic, and the catalog client.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logic;
pub mod models;

pub use api::{allowed_origin, bracket_for, configure, error_response, AppState, BracketQuery};
pub use catalog::{
    http_client, AccessToken, CatalogError, CatalogSource, ClientCredentialsProvider,
    CredentialProvider, SpotifyCatalog, StaticToken,
};
pub use config::{AppConfig, ConfigError};
pub use error::{validate_origin, ServiceError};
pub use logic::{
    build_bracket, create_bracket, normalize_candidates, order_pool, rounds_for, seed_pairings,
    working_size,
};
pub use models::{
    BracketError, BracketRequest, BracketSize, Candidate, Competitor, CompetitorKind, DedupPolicy,
    Matchup, Selection, EDITION_MARKERS,
};
