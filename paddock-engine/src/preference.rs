//! Preferred running conditions derived from the remaining conflict pool.
use crate::aptitude::AptitudeProfile;
use crate::classify::ConflictSet;
use crate::race::{DistanceCategory, Surface};
use crate::registry::UsedRaceRegistry;

/// Surface and distance the base pattern should gravitate toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferredConditions {
    pub surface: Surface,
    pub distance: DistanceCategory,
}

/// Pick the surface and distance with the highest aptitude-weighted count
/// among the still-unused conflict races.
///
/// Score per category is aptitude score times race count. The maximum wins
/// even when every score is negative; ties resolve to the first category in
/// canonical order. Only an all-zero score map falls back to Turf / Sprint.
#[must_use]
pub fn select_preferred(
    conflicts: &ConflictSet,
    registry: &UsedRaceRegistry,
    profile: &AptitudeProfile,
) -> PreferredConditions {
    let mut surface_count = [0i32; 2];
    let mut distance_count = [0i32; 4];
    for race in &conflicts.races {
        if registry.contains(race.id) {
            continue;
        }
        surface_count[race.surface.id() as usize] += 1;
        distance_count[race.distance.id() as usize - 1] += 1;
    }

    let mut surface = Surface::Turf;
    let mut best = i32::MIN;
    let mut all_zero = true;
    for candidate in Surface::ALL {
        let score = profile.surface_score(candidate) * surface_count[candidate.id() as usize];
        if score != 0 {
            all_zero = false;
        }
        if score > best {
            best = score;
            surface = candidate;
        }
    }
    if all_zero {
        surface = Surface::Turf;
    }

    let mut distance = DistanceCategory::Sprint;
    let mut best = i32::MIN;
    let mut all_zero = true;
    for candidate in DistanceCategory::ALL {
        let score =
            profile.distance_score(candidate) * distance_count[candidate.id() as usize - 1];
        if score != 0 {
            all_zero = false;
        }
        if score > best {
            best = score;
            distance = candidate;
        }
    }
    if all_zero {
        distance = DistanceCategory::Sprint;
    }

    PreferredConditions { surface, distance }
}
