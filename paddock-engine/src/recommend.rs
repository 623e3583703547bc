//! Scenario recommendation for the next career run.
use serde::{Deserialize, Serialize};

use crate::aptitude::{AptitudeProfile, Grade};
use crate::factors::Factor;
use crate::overseas::{ARC_DE_TRIOMPHE, JAPANESE_DERBY, PRIX_FOY, PRIX_NIEL, TAKARAZUKA_KINEN};
use crate::race::{DistanceCategory, Half, Race, ScenarioRace, Surface};

/// Which scenario the next career run should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioChoice {
    /// Scenario conflicts remain; run the standard story.
    Standard,
    /// No conflicts and the overseas windows are already cleared elsewhere;
    /// any scenario works.
    Free,
    /// Overseas branch races (or its windows) still need a run.
    Overseas,
}

/// Recommendation plus the factor loadout that lifts the weak aptitudes the
/// remaining pool leans on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRecommendation {
    pub scenario: ScenarioChoice,
    pub required_factors: Vec<Factor>,
}

/// Recommend a scenario and factor loadout for the remaining pool.
#[must_use]
pub fn recommend_scenario(
    profile: &AptitudeProfile,
    bindings: &[ScenarioRace],
    catalog: &[Race],
    remaining: &[Race],
) -> ScenarioRecommendation {
    let scenario = if has_scenario_conflict(bindings, catalog, remaining) {
        ScenarioChoice::Standard
    } else if overseas_windows_blocked(remaining) {
        ScenarioChoice::Free
    } else {
        ScenarioChoice::Overseas
    };
    ScenarioRecommendation {
        scenario,
        required_factors: required_factors(profile, remaining),
    }
}

/// Whether any remaining race shares a timing slot with a scenario race.
fn has_scenario_conflict(
    bindings: &[ScenarioRace],
    catalog: &[Race],
    remaining: &[Race],
) -> bool {
    bindings.iter().any(|binding| {
        catalog
            .iter()
            .find(|race| race.id == binding.race_id)
            .is_some_and(|anchor| {
                remaining
                    .iter()
                    .any(|race| race.at(anchor.month, anchor.half) && race.name != anchor.name)
            })
    })
}

/// True when a non-anchor race still sits in a window the branch would
/// freeze, so the branch run would lock that race out. Branch-only races in
/// the pool override this: those need the branch itself.
fn overseas_windows_blocked(remaining: &[Race]) -> bool {
    if remaining.iter().any(|race| race.branch_only) {
        return false;
    }
    remaining.iter().any(|race| {
        if race.month == 5 && race.half == Half::Second && race.name != JAPANESE_DERBY {
            return true;
        }
        if (7..=9).contains(&race.month)
            && !race.classic
            && race.name != PRIX_NIEL
            && race.name != PRIX_FOY
        {
            return true;
        }
        if race.month == 10 && race.half == Half::First && race.name != ARC_DE_TRIOMPHE {
            return true;
        }
        race.month == 10
            && race.half == Half::First
            && race.senior
            && !race.classic
            && !race.junior
            && race.name != TAKARAZUKA_KINEN
    })
}

/// Surface-by-distance buckets ranked by remaining count, descending.
/// Ties keep the canonical walk order (turf buckets first, short to long).
fn ranked_buckets(remaining: &[Race]) -> Vec<(Surface, DistanceCategory)> {
    let mut buckets: Vec<(Surface, DistanceCategory, usize)> = Vec::new();
    for surface in Surface::ALL {
        for distance in DistanceCategory::ALL {
            // The graded catalog has no dirt long races.
            if surface == Surface::Dirt && distance == DistanceCategory::Long {
                continue;
            }
            let count = remaining
                .iter()
                .filter(|race| race.surface == surface && race.distance == distance)
                .count();
            buckets.push((surface, distance, count));
        }
    }
    buckets.sort_by(|a, b| b.2.cmp(&a.2));
    buckets
        .into_iter()
        .map(|(surface, distance, _)| (surface, distance))
        .collect()
}

/// Factor copies needed to lift one letter grade into racing shape.
const fn copies_for(grade: Grade) -> usize {
    match grade {
        Grade::E => 1,
        Grade::F => 2,
        Grade::G => 3,
        _ => 0,
    }
}

fn push_copies(factors: &mut Vec<Factor>, factor: Factor, copies: usize) {
    for _ in 0..copies {
        if factors.len() == 6 {
            break;
        }
        factors.push(factor);
    }
}

/// Walk the busiest buckets, appending the factors each one's weak
/// aptitudes demand, surface before distance, capped at six, sorted.
fn required_factors(profile: &AptitudeProfile, remaining: &[Race]) -> Vec<Factor> {
    let mut factors = Vec::new();
    for (surface, distance) in ranked_buckets(remaining).into_iter().take(7) {
        let surface_grade = match surface {
            Surface::Turf => profile.turf,
            Surface::Dirt => profile.dirt,
        };
        push_copies(&mut factors, Factor::for_surface(surface), copies_for(surface_grade));
        if factors.len() == 6 {
            break;
        }
        let distance_grade = match distance {
            DistanceCategory::Sprint => profile.sprint,
            DistanceCategory::Mile => profile.mile,
            DistanceCategory::Middle => profile.middle,
            DistanceCategory::Long => profile.long,
        };
        push_copies(&mut factors, Factor::for_distance(distance), copies_for(distance_grade));
        if factors.len() == 6 {
            break;
        }
    }
    factors.sort_unstable();
    factors
}
