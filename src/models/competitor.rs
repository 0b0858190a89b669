//! Candidate (raw catalog record) and Competitor (deduplicated bracket entry).

use serde::{Deserialize, Serialize};

/// Title fragments that mark an alternate edition of the same work.
pub const EDITION_MARKERS: [&str; 3] = ["Deluxe", "Extended", "Exclusive"];

/// A raw competitor record as fetched from the catalog, before deduplication.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// None (or blank) only for malformed upstream data.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub popularity: u32,
    /// Image URLs; the first one is the primary artwork.
    #[serde(default)]
    pub artwork_ids: Vec<String>,
}

impl Candidate {
    pub fn new(title: impl Into<String>, popularity: u32, artwork_ids: Vec<String>) -> Self {
        Self {
            title: Some(title.into()),
            popularity,
            artwork_ids,
        }
    }
}

/// A canonical entry eligible for bracket placement.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub title: String,
    pub popularity: u32,
    pub artwork_ids: Vec<String>,
}

impl Competitor {
    pub fn new(title: impl Into<String>, popularity: u32, artwork_ids: Vec<String>) -> Self {
        Self {
            title: title.into(),
            popularity,
            artwork_ids,
        }
    }

    /// The synthetic opponent for a slot with no real competitor.
    pub fn bye() -> Self {
        Self::default()
    }

    pub fn is_bye(&self) -> bool {
        self.title.is_empty()
    }

    pub fn primary_artwork(&self) -> Option<&str> {
        self.artwork_ids.first().map(String::as_str)
    }

    /// Same underlying work: identical titles, identical primary artwork, or an
    /// edition-marked title extending the other one.
    pub fn is_duplicate_of(&self, other: &Competitor) -> bool {
        if self.title == other.title {
            return true;
        }
        if let (Some(a), Some(b)) = (self.primary_artwork(), other.primary_artwork()) {
            if a == b {
                return true;
            }
        }
        is_edition_of(&self.title, &other.title) || is_edition_of(&other.title, &self.title)
    }
}

/// `longer` starts with `base` and carries an edition marker.
fn is_edition_of(longer: &str, base: &str) -> bool {
    longer.starts_with(base) && EDITION_MARKERS.iter().any(|m| longer.contains(m))
}
