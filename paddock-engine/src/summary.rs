//! Remaining-race tallies per surface and distance.
use serde::{Deserialize, Serialize};

use crate::race::{DistanceCategory, Race, Surface};

/// Counts of a character's remaining graded races.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemainingSummary {
    /// Every graded race has been run.
    pub all_crown: bool,
    pub total: usize,
    /// Counts indexed by surface id, then distance id - 1.
    pub buckets: [[usize; 4]; 2],
}

impl RemainingSummary {
    #[must_use]
    pub const fn count(&self, surface: Surface, distance: DistanceCategory) -> usize {
        self.buckets[surface.id() as usize][distance.id() as usize - 1]
    }
}

/// Tally the remaining pool into surface-by-distance buckets.
#[must_use]
pub fn summarize_remaining(remaining: &[Race]) -> RemainingSummary {
    let mut buckets = [[0usize; 4]; 2];
    for race in remaining {
        buckets[race.surface.id() as usize][race.distance.id() as usize - 1] += 1;
    }
    RemainingSummary {
        all_crown: remaining.is_empty(),
        total: remaining.len(),
        buckets,
    }
}
