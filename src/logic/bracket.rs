//! Bracket builder: order the pool, fit it to a size, and resolve seeds into matchups.

use crate::logic::seeding::{seed_pairings, working_size};
use crate::models::{BracketError, BracketSize, Competitor, Matchup, Selection};
use rand::seq::SliceRandom;
use rand::Rng;

/// Order the pool in place: stable popularity-descending for `Seeded`, a full shuffle otherwise.
pub fn order_pool<R: Rng + ?Sized>(pool: &mut [Competitor], selection: Selection, rng: &mut R) {
    match selection {
        Selection::Seeded => pool.sort_by(|a, b| b.popularity.cmp(&a.popularity)),
        Selection::Unordered => pool.shuffle(rng),
    }
}

/// Build the first-round matchups for `pool`.
///
/// 1. Order the pool (see [`order_pool`]).
/// 2. Resolve the size (`Auto` = pool length) and truncate the pool to it.
/// 3. Shrink the working size while half of it exceeds the pool.
/// 4. Place seeds by bracket mirroring; seed `n` is the n-th pool entry, or a bye past the end.
pub fn build_bracket<R: Rng + ?Sized>(
    mut pool: Vec<Competitor>,
    size: BracketSize,
    selection: Selection,
    rng: &mut R,
) -> Result<Vec<Matchup>, BracketError> {
    if let BracketSize::Exact(n) = size {
        BracketSize::exact(n)?;
    }

    order_pool(&mut pool, selection, rng);

    let requested = size.resolve(pool.len());
    pool.truncate(requested);

    let working = working_size(requested, pool.len());
    if working < 2 || pool.len() < 2 {
        return Err(BracketError::InsufficientCompetitors);
    }
    if working != requested {
        log::debug!("Shrinking bracket from {} to {} slots for {} competitors", requested, working, pool.len());
    }

    let matchups = seed_pairings(working)
        .into_iter()
        .map(|(top, bottom)| Matchup::new(slot(&pool, top), slot(&pool, bottom)))
        .collect();
    Ok(matchups)
}

/// Competitor holding 1-based `seed`, or a bye when the pool is too short.
fn slot(pool: &[Competitor], seed: usize) -> Competitor {
    pool.get(seed - 1).cloned().unwrap_or_else(Competitor::bye)
}
