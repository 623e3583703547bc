//! Career playthrough estimator.
//!
//! Estimates how many full careers are still needed to run every remaining
//! race, given that each timing slot fits one race per career.
use std::collections::{HashMap, HashSet};

use crate::classify::classify;
use crate::race::{Half, Race, RaceId, ScenarioRace, Stage};

/// Contribution of one race to a (stage, month, half) tally: a race eligible
/// in a single stage demands that stage fully, a multi-stage race can be
/// satisfied in either year.
fn stage_weight(race: &Race) -> f64 {
    if race.stage_count() <= 1 { 1.0 } else { 0.5 }
}

/// Estimate the number of playthroughs needed to clear the remaining pool.
///
/// Two tallies are kept per (stage, month, half): the whole remaining pool,
/// scenario races included, and the subset of non-scenario races colliding
/// with scenario timing slots. The answer is the ceiling of the worst slot
/// demand, floored at one.
#[must_use]
pub fn estimate_breeding_count(
    bindings: &[ScenarioRace],
    catalog: &[Race],
    remaining: &[Race],
) -> u32 {
    let scenario_ids: HashSet<RaceId> = bindings.iter().map(|b| b.race_id).collect();

    let mut conflict_ids: HashSet<RaceId> = HashSet::new();
    for binding in bindings {
        let Some(anchor) = catalog.iter().find(|race| race.id == binding.race_id) else {
            continue;
        };
        let stage = classify(anchor, None);
        for race in remaining {
            if !scenario_ids.contains(&race.id)
                && race.at(anchor.month, anchor.half)
                && classify(race, None) == stage
            {
                conflict_ids.insert(race.id);
            }
        }
    }

    let mut pool_demand: HashMap<(Stage, u8, Half), f64> = HashMap::new();
    let mut conflict_demand: HashMap<(Stage, u8, Half), f64> = HashMap::new();
    for race in remaining {
        let weight = stage_weight(race);
        for stage in Stage::ALL {
            if !race.eligible_for(stage) {
                continue;
            }
            let key = (stage, race.month, race.half);
            *pool_demand.entry(key).or_default() += weight;
            if conflict_ids.contains(&race.id) {
                *conflict_demand.entry(key).or_default() += weight;
            }
        }
    }

    let mut estimate = 1u32;
    for (key, demand) in &pool_demand {
        let restricted = conflict_demand.get(key).copied().unwrap_or(0.0);
        let slot_need = demand.max(restricted).ceil() as u32;
        estimate = estimate.max(slot_need);
    }
    estimate
}
