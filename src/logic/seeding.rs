//! Seed placement for a standard single-elimination bracket.

/// Halve `size` while half of it would still exceed the pool.
///
/// A 16-slot request with 5 competitors plays as an 8-slot bracket with 3 byes,
/// never as a 16-slot bracket padded with 11.
pub fn working_size(size: usize, pool_len: usize) -> usize {
    let mut size = size;
    while size / 2 > pool_len {
        size /= 2;
    }
    size
}

/// Number of rounds in a bracket with `size` slots: `ceil(log2(size))`.
pub fn rounds_for(size: usize) -> u32 {
    size.max(1).next_power_of_two().trailing_zeros()
}

/// First-round seed pairings in left-to-right bracket order.
///
/// Starts from the final `(1, 2)` and mirrors each pairing one round further
/// out: `(a, b)` becomes `(a, sum - a), (sum - b, b)` with `sum = 2^(round + 1) + 1`.
/// The result keeps seeds 1 and 2 apart until the final, seeds 1-4 apart until
/// the semifinals, and so on. A non-power-of-two `size` yields the pairings of
/// the next power of two.
pub fn seed_pairings(size: usize) -> Vec<(usize, usize)> {
    let rounds = rounds_for(size);
    let mut pairings = vec![(1, 2)];
    for round in 1..rounds {
        let sum = (1usize << (round + 1)) + 1;
        pairings = pairings
            .iter()
            .flat_map(|&(top, bottom)| [(top, sum - top), (sum - bottom, bottom)])
            .collect();
    }
    pairings
}
