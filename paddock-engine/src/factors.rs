//! Inheritance factor composition.
//!
//! Converts a finished calendar (or an explicit reinforcement strategy) into
//! the fixed six-entry factor array shown to the player.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::aptitude::AptitudeProfile;
use crate::race::{DistanceCategory, Race, Surface};
use crate::strategy::ReinforcementStrategy;

/// Inheritable trait label occupying one factor slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Factor {
    Turf,
    Dirt,
    Sprint,
    Mile,
    Middle,
    Long,
    /// Unconstrained slot; any factor works here.
    Free,
}

impl Factor {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Turf => "Turf",
            Self::Dirt => "Dirt",
            Self::Sprint => "Sprint",
            Self::Mile => "Mile",
            Self::Middle => "Middle",
            Self::Long => "Long",
            Self::Free => "Free",
        }
    }

    #[must_use]
    pub const fn for_surface(surface: Surface) -> Self {
        match surface {
            Surface::Turf => Self::Turf,
            Surface::Dirt => Self::Dirt,
        }
    }

    #[must_use]
    pub const fn for_distance(distance: DistanceCategory) -> Self {
        match distance {
            DistanceCategory::Sprint => Self::Sprint,
            DistanceCategory::Mile => Self::Mile,
            DistanceCategory::Middle => Self::Middle,
            DistanceCategory::Long => Self::Long,
        }
    }
}

impl std::fmt::Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Number of factor slots in every composition.
pub const FACTOR_SLOTS: usize = 6;

/// Fixed-capacity factor composition; always exactly [`FACTOR_SLOTS`] entries
/// once computed.
pub type FactorArray = SmallVec<[Factor; FACTOR_SLOTS]>;

/// Compose factors from an explicit reinforcement strategy: `count` copies of
/// each target category in strategy order, padded with `Free`.
#[must_use]
pub fn strategy_factors(strategy: &ReinforcementStrategy) -> FactorArray {
    let mut factors = FactorArray::new();
    for (category, count) in &strategy.targets {
        for _ in 0..*count {
            if factors.len() == FACTOR_SLOTS {
                break;
            }
            factors.push(category.factor());
        }
    }
    pad_free(&mut factors);
    factors
}

/// Compose factors from the races actually present in a finished plan.
///
/// Categories the character is weak in (C or worse) and that the plan
/// exercises are served lowest aptitude first; within a tier, distance
/// buckets longest first, then Dirt, then Turf.
#[must_use]
pub fn default_factors(profile: &AptitudeProfile, races: &[&Race]) -> FactorArray {
    let mut surface_present = [false; 2];
    let mut distance_present = [false; 4];
    for race in races {
        surface_present[race.surface.id() as usize] = true;
        distance_present[race.distance.id() as usize - 1] = true;
    }

    // (score, tie rank, factor) for every present category needing help.
    let mut needs: Vec<(i32, u8, Factor)> = Vec::new();
    for (tie, distance) in [
        DistanceCategory::Long,
        DistanceCategory::Middle,
        DistanceCategory::Mile,
        DistanceCategory::Sprint,
    ]
    .into_iter()
    .enumerate()
    {
        let score = profile.distance_score(distance);
        if distance_present[distance.id() as usize - 1] && score <= 1 {
            needs.push((score, tie as u8, Factor::for_distance(distance)));
        }
    }
    for (tie, surface) in [Surface::Dirt, Surface::Turf].into_iter().enumerate() {
        let score = profile.surface_score(surface);
        if surface_present[surface.id() as usize] && score <= 1 {
            needs.push((score, 4 + tie as u8, Factor::for_surface(surface)));
        }
    }
    needs.sort_by_key(|(score, tie, _)| (*score, *tie));

    let competing = needs.len() > 1;
    let mut factors = FactorArray::new();
    for (score, _, factor) in needs {
        let wanted = needed_count(score, competing);
        for _ in 0..wanted {
            if factors.len() == FACTOR_SLOTS {
                break;
            }
            factors.push(factor);
        }
    }
    pad_free(&mut factors);
    factors
}

/// Factor copies required to lift one weak category, by aptitude tier.
const fn needed_count(score: i32, competing: bool) -> usize {
    if score <= -1 {
        if competing { 3 } else { 4 }
    } else if score == 0 {
        3
    } else {
        2
    }
}

fn pad_free(factors: &mut FactorArray) {
    while factors.len() < FACTOR_SLOTS {
        factors.push(Factor::Free);
    }
    factors.truncate(FACTOR_SLOTS);
}
