//! First-round matchup between two bracket slots.

use crate::models::competitor::Competitor;
use serde::{Deserialize, Serialize};

/// One first-round pairing. Either side may be the bye marker.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matchup {
    pub top_competitor: Competitor,
    pub bottom_competitor: Competitor,
}

impl Matchup {
    pub fn new(top_competitor: Competitor, bottom_competitor: Competitor) -> Self {
        Self {
            top_competitor,
            bottom_competitor,
        }
    }

    pub fn has_bye(&self) -> bool {
        self.top_competitor.is_bye() || self.bottom_competitor.is_bye()
    }
}
