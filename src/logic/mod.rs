//! Bracket business logic: normalization, seeding, and matchup construction.

mod bracket;
mod normalize;
mod seeding;

pub use bracket::{build_bracket, order_pool};
pub use normalize::normalize_candidates;
pub use seeding::{rounds_for, seed_pairings, working_size};

use crate::models::{BracketError, BracketRequest, DedupPolicy, Matchup};
use rand::Rng;

/// Turn raw catalog candidates into first-round matchups: normalize, then build.
pub fn create_bracket<R: Rng + ?Sized>(
    request: BracketRequest,
    policy: DedupPolicy,
    rng: &mut R,
) -> Result<Vec<Matchup>, BracketError> {
    let fetched = request.candidates.len();
    let pool = normalize_candidates(request.candidates, policy, rng)?;
    log::debug!(
        "Normalized {} {:?} candidates into {} competitors",
        fetched,
        request.competitor_type,
        pool.len()
    );
    build_bracket(pool, request.size, request.selection, rng)
}
