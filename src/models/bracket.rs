//! Bracket request parameters and BracketError.

use crate::models::competitor::Candidate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Errors that can occur while normalizing competitors or building a bracket.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// A catalog record had no title.
    InvalidCandidate,
    /// Explicit size is not a positive power of two (carries the rejected input).
    InvalidSize(String),
    /// Fewer than 2 competitors left after truncation and shrinking.
    InsufficientCompetitors,
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::InvalidCandidate => write!(f, "Catalog returned a competitor without a title"),
            BracketError::InvalidSize(size) => {
                write!(f, "Invalid size {:?} (must be a positive power of 2 or \"auto\")", size)
            }
            BracketError::InsufficientCompetitors => write!(f, "Insufficient competitors (need at least 2)"),
        }
    }
}

impl std::error::Error for BracketError {}

/// What the bracket is made of.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitorKind {
    Album,
    Track,
}

impl FromStr for CompetitorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "album" => Ok(CompetitorKind::Album),
            "track" => Ok(CompetitorKind::Track),
            other => Err(other.to_string()),
        }
    }
}

/// How the pool is ordered before seeds are assigned.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Most popular first; seed 1 is the most popular competitor.
    Seeded,
    /// Shuffled per request.
    #[default]
    Unordered,
}

impl FromStr for Selection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seeded" => Ok(Selection::Seeded),
            "unordered" => Ok(Selection::Unordered),
            other => Err(other.to_string()),
        }
    }
}

/// Requested bracket size.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BracketSize {
    /// As many slots as there are competitors.
    Auto,
    /// Positive power of two.
    Exact(usize),
}

impl BracketSize {
    /// Validated explicit size.
    pub fn exact(size: usize) -> Result<Self, BracketError> {
        if size == 0 || !size.is_power_of_two() {
            return Err(BracketError::InvalidSize(size.to_string()));
        }
        Ok(BracketSize::Exact(size))
    }

    /// Slot count before truncation and shrinking.
    pub fn resolve(self, pool_len: usize) -> usize {
        match self {
            BracketSize::Auto => pool_len,
            BracketSize::Exact(n) => n,
        }
    }
}

impl FromStr for BracketSize {
    type Err = BracketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "auto" {
            return Ok(BracketSize::Auto);
        }
        // Plain decimal digits only: no sign, no whitespace.
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BracketError::InvalidSize(s.to_string()));
        }
        let n: usize = s.parse().map_err(|_| BracketError::InvalidSize(s.to_string()))?;
        BracketSize::exact(n)
    }
}

/// How the normalizer settles which of two duplicates is kept.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupPolicy {
    /// Higher popularity, then shorter title, then a coin flip.
    #[default]
    PopularityFirst,
    /// Shorter title regardless of popularity; on equal length the newer record wins.
    ShortestTitle,
}

impl FromStr for DedupPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "popularity_first" => Ok(DedupPolicy::PopularityFirst),
            "shortest_title" => Ok(DedupPolicy::ShortestTitle),
            other => Err(other.to_string()),
        }
    }
}

/// Everything the core needs for one bracket.
#[derive(Clone, Debug)]
pub struct BracketRequest {
    pub competitor_type: CompetitorKind,
    pub size: BracketSize,
    pub selection: Selection,
    /// Flattened catalog records in fetch order.
    pub candidates: Vec<Candidate>,
}
