//! Reinforcement strategies: deliberate over-representation of weak
//! categories in the factor mix, plus the race filter each strategy implies.
use serde::{Deserialize, Serialize};

use crate::aptitude::AptitudeProfile;
use crate::factors::Factor;
use crate::race::{DistanceCategory, Race, Surface};

/// Aptitude score at or below which a category counts as weak (C or worse).
pub const WEAK_APTITUDE_CEILING: i32 = 1;

/// Category a reinforcement strategy may target.
///
/// Turf is deliberately absent: turf races form the default pool and are
/// never strategy-filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyCategory {
    Dirt,
    Sprint,
    Mile,
    Middle,
    Long,
}

impl StrategyCategory {
    pub const ALL: [Self; 5] = [
        Self::Dirt,
        Self::Sprint,
        Self::Mile,
        Self::Middle,
        Self::Long,
    ];

    /// Numeric aptitude of the backing profile axis.
    #[must_use]
    pub const fn score(self, profile: &AptitudeProfile) -> i32 {
        match self {
            Self::Dirt => profile.surface_score(Surface::Dirt),
            Self::Sprint => profile.distance_score(DistanceCategory::Sprint),
            Self::Mile => profile.distance_score(DistanceCategory::Mile),
            Self::Middle => profile.distance_score(DistanceCategory::Middle),
            Self::Long => profile.distance_score(DistanceCategory::Long),
        }
    }

    #[must_use]
    pub const fn factor(self) -> Factor {
        match self {
            Self::Dirt => Factor::Dirt,
            Self::Sprint => Factor::Sprint,
            Self::Mile => Factor::Mile,
            Self::Middle => Factor::Middle,
            Self::Long => Factor::Long,
        }
    }

    /// Surface this category implies, if any.
    #[must_use]
    pub const fn surface(self) -> Option<Surface> {
        match self {
            Self::Dirt => Some(Surface::Dirt),
            _ => None,
        }
    }

    /// Distance bucket this category implies, if any.
    #[must_use]
    pub const fn distance(self) -> Option<DistanceCategory> {
        match self {
            Self::Dirt => None,
            Self::Sprint => Some(DistanceCategory::Sprint),
            Self::Mile => Some(DistanceCategory::Mile),
            Self::Middle => Some(DistanceCategory::Middle),
            Self::Long => Some(DistanceCategory::Long),
        }
    }
}

/// A deliberate factor-mix override targeting specific weak categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReinforcementStrategy {
    /// Target categories with their factor counts, in emission order.
    pub targets: Vec<(StrategyCategory, u8)>,
}

impl ReinforcementStrategy {
    /// Standard pair strategy: three factors for each member.
    #[must_use]
    pub fn pair(a: StrategyCategory, b: StrategyCategory) -> Self {
        Self {
            targets: vec![(a, 3), (b, 3)],
        }
    }

    #[must_use]
    pub fn contains(&self, category: StrategyCategory) -> bool {
        self.targets.iter().any(|(c, _)| *c == category)
    }

    /// Surface the strategy steers toward, when a surface member exists.
    #[must_use]
    pub fn implied_surface(&self) -> Option<Surface> {
        self.targets.iter().find_map(|(c, _)| c.surface())
    }

    /// Distance buckets the strategy steers toward.
    #[must_use]
    pub fn implied_distances(&self) -> Vec<DistanceCategory> {
        self.targets.iter().filter_map(|(c, _)| c.distance()).collect()
    }

    /// Whether a race matches the strategy's surface and distance implications.
    #[must_use]
    pub fn race_matches(&self, race: &Race) -> bool {
        if let Some(surface) = self.implied_surface()
            && race.surface != surface
        {
            return false;
        }
        let distances = self.implied_distances();
        distances.is_empty() || distances.contains(&race.distance)
    }
}

/// Build the cyclic strategy list for a profile.
///
/// One strategy per unordered pair of weak categories; fewer than two weak
/// categories yields the single `None` entry (default factor computation).
#[must_use]
pub fn build_strategies(profile: &AptitudeProfile) -> Vec<Option<ReinforcementStrategy>> {
    let candidates: Vec<StrategyCategory> = StrategyCategory::ALL
        .into_iter()
        .filter(|category| category.score(profile) <= WEAK_APTITUDE_CEILING)
        .collect();
    if candidates.len() < 2 {
        return vec![None];
    }
    let mut strategies = Vec::new();
    for (i, a) in candidates.iter().enumerate() {
        for b in &candidates[i + 1..] {
            strategies.push(Some(ReinforcementStrategy::pair(*a, *b)));
        }
    }
    strategies
}

/// Remove races the active strategy does not support from the working pool.
///
/// Unsupported means: weak category outside the strategy. Dirt-unsupported
/// drops dirt races; unsupported distance buckets drop their races. Turf is
/// never filtered.
#[must_use]
pub fn filter_pool(
    pool: &[Race],
    strategy: Option<&ReinforcementStrategy>,
    profile: &AptitudeProfile,
) -> Vec<Race> {
    let Some(strategy) = strategy else {
        return pool.to_vec();
    };
    let unsupported: Vec<StrategyCategory> = StrategyCategory::ALL
        .into_iter()
        .filter(|category| {
            category.score(profile) <= WEAK_APTITUDE_CEILING && !strategy.contains(*category)
        })
        .collect();
    let drop_dirt = unsupported.contains(&StrategyCategory::Dirt);
    let dropped_distances: Vec<DistanceCategory> =
        unsupported.iter().filter_map(|c| c.distance()).collect();

    pool.iter()
        .filter(|race| {
            if drop_dirt && race.surface == Surface::Dirt {
                return false;
            }
            !dropped_distances.contains(&race.distance)
        })
        .cloned()
        .collect()
}
