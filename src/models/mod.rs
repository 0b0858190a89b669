//! Data structures for madness brackets: candidates, competitors, matchups, request parameters.

mod bracket;
mod competitor;
mod matchup;

pub use bracket::{BracketError, BracketRequest, BracketSize, CompetitorKind, DedupPolicy, Selection};
pub use competitor::{Candidate, Competitor, EDITION_MARKERS};
pub use matchup::Matchup;
