//! Competitor normalization: fold catalog candidates into a deduplicated pool.

use crate::models::{BracketError, Candidate, Competitor, DedupPolicy};
use rand::Rng;
use std::cmp::Ordering;

/// Merge alternate editions (deluxe, extended, ...) into one competitor each.
///
/// Candidates are folded in fetch order. Each one is compared against every
/// competitor kept so far; every match is settled independently by `policy`,
/// so a candidate matching two kept entries can update both. Candidates that
/// match nothing are appended, which keeps the result in first-seen order.
///
/// Full ties under [`DedupPolicy::PopularityFirst`] are broken by `rng`.
pub fn normalize_candidates<R: Rng + ?Sized>(
    candidates: Vec<Candidate>,
    policy: DedupPolicy,
    rng: &mut R,
) -> Result<Vec<Competitor>, BracketError> {
    let mut pool: Vec<Competitor> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let incoming = into_competitor(candidate)?;
        let mut duplicate = false;
        for kept in pool.iter_mut() {
            if !kept.is_duplicate_of(&incoming) {
                continue;
            }
            duplicate = true;
            if prefer_incoming(kept, &incoming, policy, rng) {
                log::debug!("Replacing {:?} with duplicate {:?}", kept.title, incoming.title);
                *kept = incoming.clone();
            } else {
                log::debug!("Dropping {:?} in favour of {:?}", incoming.title, kept.title);
            }
        }
        if !duplicate {
            pool.push(incoming);
        }
    }

    Ok(pool)
}

fn into_competitor(candidate: Candidate) -> Result<Competitor, BracketError> {
    match candidate.title {
        Some(title) if !title.trim().is_empty() => Ok(Competitor {
            title,
            popularity: candidate.popularity,
            artwork_ids: candidate.artwork_ids,
        }),
        _ => Err(BracketError::InvalidCandidate),
    }
}

/// Whether `incoming` should replace `kept`.
fn prefer_incoming<R: Rng + ?Sized>(
    kept: &Competitor,
    incoming: &Competitor,
    policy: DedupPolicy,
    rng: &mut R,
) -> bool {
    let kept_len = kept.title.chars().count();
    let incoming_len = incoming.title.chars().count();
    match policy {
        DedupPolicy::PopularityFirst => match incoming.popularity.cmp(&kept.popularity) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => match incoming_len.cmp(&kept_len) {
                Ordering::Less => true,
                Ordering::Greater => false,
                // Non-deterministic unless the caller seeds rng.
                Ordering::Equal => rng.gen_bool(0.5),
            },
        },
        DedupPolicy::ShortestTitle => incoming_len <= kept_len,
    }
}
