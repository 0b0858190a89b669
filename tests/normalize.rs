//! Integration tests for competitor normalization: duplicate detection and merge tie-breaks.

use madness_bracket::{normalize_candidates, BracketError, Candidate, DedupPolicy};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn candidate(title: &str, popularity: u32, art: &str) -> Candidate {
    Candidate::new(title, popularity, vec![art.to_string()])
}

fn titles(candidates: Vec<Candidate>, policy: DedupPolicy) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(7);
    normalize_candidates(candidates, policy, &mut rng)
        .unwrap()
        .into_iter()
        .map(|c| c.title)
        .collect()
}

#[test]
fn higher_popularity_edition_wins() {
    let mut rng = StdRng::seed_from_u64(1);
    let pool = normalize_candidates(
        vec![
            candidate("Album", 50, "a.jpg"),
            candidate("Album (Deluxe)", 70, "b.jpg"),
        ],
        DedupPolicy::PopularityFirst,
        &mut rng,
    )
    .unwrap();
    assert_eq!(pool.len(), 1);
    assert_eq!(pool[0].title, "Album (Deluxe)");
    assert_eq!(pool[0].popularity, 70);
    assert_eq!(pool[0].artwork_ids, vec!["b.jpg".to_string()]);
}

#[test]
fn equal_popularity_prefers_shorter_title() {
    let forward = titles(
        vec![
            candidate("Song", 80, "a.jpg"),
            candidate("Song - Extended", 80, "b.jpg"),
        ],
        DedupPolicy::PopularityFirst,
    );
    assert_eq!(forward, vec!["Song"]);

    let reversed = titles(
        vec![
            candidate("Song - Extended", 80, "b.jpg"),
            candidate("Song", 80, "a.jpg"),
        ],
        DedupPolicy::PopularityFirst,
    );
    assert_eq!(reversed, vec!["Song"]);
}

#[test]
fn less_popular_duplicate_is_dropped() {
    let kept = titles(
        vec![
            candidate("Record", 90, "a.jpg"),
            candidate("Record (Exclusive Edition)", 40, "b.jpg"),
        ],
        DedupPolicy::PopularityFirst,
    );
    assert_eq!(kept, vec!["Record"]);
}

#[test]
fn shared_primary_artwork_is_a_duplicate() {
    let kept = titles(
        vec![
            Candidate::new("Live at Home", 30, vec!["same.jpg".into(), "x.jpg".into()]),
            Candidate::new("Live at Home (Remastered)", 60, vec!["same.jpg".into()]),
        ],
        DedupPolicy::PopularityFirst,
    );
    assert_eq!(kept, vec!["Live at Home (Remastered)"]);
}

#[test]
fn missing_artwork_never_matches() {
    let kept = titles(
        vec![
            Candidate::new("First", 10, vec![]),
            Candidate::new("Second", 20, vec![]),
            candidate("Third", 30, "c.jpg"),
        ],
        DedupPolicy::PopularityFirst,
    );
    assert_eq!(kept, vec!["First", "Second", "Third"]);
}

#[test]
fn prefix_without_edition_marker_is_distinct() {
    let kept = titles(
        vec![candidate("Red", 50, "a.jpg"), candidate("Red Planet", 60, "b.jpg")],
        DedupPolicy::PopularityFirst,
    );
    assert_eq!(kept, vec!["Red", "Red Planet"]);
}

#[test]
fn distinct_pool_is_unchanged() {
    let input = vec![
        candidate("One", 10, "1.jpg"),
        candidate("Two", 90, "2.jpg"),
        candidate("Three", 50, "3.jpg"),
        candidate("Four", 50, "4.jpg"),
    ];
    let kept = titles(input.clone(), DedupPolicy::PopularityFirst);
    assert_eq!(kept, vec!["One", "Two", "Three", "Four"]);

    let mut rng = StdRng::seed_from_u64(3);
    let first = normalize_candidates(input, DedupPolicy::PopularityFirst, &mut rng).unwrap();
    let again_input: Vec<Candidate> = first
        .iter()
        .map(|c| Candidate::new(c.title.clone(), c.popularity, c.artwork_ids.clone()))
        .collect();
    let again = normalize_candidates(again_input, DedupPolicy::PopularityFirst, &mut rng).unwrap();
    assert_eq!(first, again);
}

#[test]
fn missing_or_blank_title_is_invalid() {
    let mut rng = StdRng::seed_from_u64(0);
    let missing = Candidate {
        title: None,
        popularity: 10,
        artwork_ids: vec![],
    };
    assert_eq!(
        normalize_candidates(vec![missing], DedupPolicy::PopularityFirst, &mut rng),
        Err(BracketError::InvalidCandidate)
    );
    assert_eq!(
        normalize_candidates(
            vec![candidate("Fine", 1, "f.jpg"), candidate("  ", 5, "b.jpg")],
            DedupPolicy::PopularityFirst,
            &mut rng
        ),
        Err(BracketError::InvalidCandidate)
    );
}

#[test]
fn full_tie_is_reproducible_under_a_fixed_seed() {
    let tied = || {
        vec![
            candidate("Alpha", 40, "shared.jpg"),
            candidate("Bravo", 40, "shared.jpg"),
        ]
    };
    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        normalize_candidates(tied(), DedupPolicy::PopularityFirst, &mut rng).unwrap()
    };

    assert_eq!(run(42), run(42));

    let outcomes: HashSet<String> = (0..64).map(|seed| run(seed)[0].title.clone()).collect();
    assert_eq!(outcomes.len(), 2, "both tied records should be kept for some seed");
}

#[test]
fn shortest_title_policy_ignores_popularity() {
    let kept = titles(
        vec![
            candidate("Album (Deluxe)", 90, "a.jpg"),
            candidate("Album", 10, "b.jpg"),
        ],
        DedupPolicy::ShortestTitle,
    );
    assert_eq!(kept, vec!["Album"]);

    let newer_wins_on_equal_length = titles(
        vec![candidate("Take A", 90, "same.jpg"), candidate("Take B", 10, "same.jpg")],
        DedupPolicy::ShortestTitle,
    );
    assert_eq!(newer_wins_on_equal_length, vec!["Take B"]);
}

#[test]
fn candidate_matching_two_entries_updates_both() {
    let mut rng = StdRng::seed_from_u64(0);
    let pool = normalize_candidates(
        vec![
            candidate("X", 10, "x.jpg"),
            candidate("Y", 10, "y.jpg"),
            // Same title as X, same artwork as Y.
            candidate("X", 100, "y.jpg"),
        ],
        DedupPolicy::PopularityFirst,
        &mut rng,
    )
    .unwrap();
    assert_eq!(pool.len(), 2);
    assert!(pool.iter().all(|c| c.title == "X" && c.popularity == 100));
}
