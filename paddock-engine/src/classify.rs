//! Stage classification and scenario conflict extraction.
use std::collections::HashSet;

use crate::race::{Race, RaceId, ScenarioRace, ScenarioStage, Stage};

/// Classify which stage track a race belongs to.
///
/// A scenario override wins outright. Otherwise the non-exclusive stage
/// flags resolve by priority: Senior, then Classic, then Junior.
#[must_use]
pub const fn classify(race: &Race, stage_override: Option<ScenarioStage>) -> Stage {
    match stage_override {
        Some(ScenarioStage::Senior) => Stage::Senior,
        Some(ScenarioStage::Classic) => Stage::Classic,
        None => {
            if race.senior {
                Stage::Senior
            } else if race.classic {
                Stage::Classic
            } else {
                Stage::Junior
            }
        }
    }
}

/// Races competing with the story schedule, plus the story race ids.
#[derive(Debug, Clone, Default)]
pub struct ConflictSet {
    /// Remaining races that share a timing slot with a scenario race,
    /// in scenario order, deduplicated.
    pub races: Vec<Race>,
    /// Ids of the scenario races themselves.
    pub scenario_ids: HashSet<RaceId>,
}

/// Collect every remaining race that collides with a scenario race.
///
/// A remaining race conflicts when its month, half, and classified stage all
/// match a scenario race's slot, it is not itself a scenario race, and it
/// has not been collected already.
#[must_use]
pub fn extract_conflicts(
    bindings: &[ScenarioRace],
    catalog: &[Race],
    pool: &[Race],
) -> ConflictSet {
    let scenario_ids: HashSet<RaceId> = bindings.iter().map(|b| b.race_id).collect();
    let mut seen: HashSet<RaceId> = HashSet::new();
    let mut races = Vec::new();

    for binding in bindings {
        let Some(anchor) = catalog.iter().find(|race| race.id == binding.race_id) else {
            continue;
        };
        let stage = classify(anchor, binding.stage_override);
        for race in pool {
            if scenario_ids.contains(&race.id) || seen.contains(&race.id) {
                continue;
            }
            if race.at(anchor.month, anchor.half) && classify(race, None) == stage {
                seen.insert(race.id);
                races.push(race.clone());
            }
        }
    }

    ConflictSet {
        races,
        scenario_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::race::{DistanceCategory, Half, RaceRank, Surface};

    fn race(id: u32, month: u8, half: Half, junior: bool, classic: bool, senior: bool) -> Race {
        Race {
            id: RaceId(id),
            name: format!("Race {id}"),
            surface: Surface::Turf,
            distance: DistanceCategory::Middle,
            month,
            half,
            rank: RaceRank::G1,
            junior,
            classic,
            senior,
            branch_only: false,
        }
    }

    #[test]
    fn senior_flag_wins_over_classic() {
        let r = race(1, 4, Half::First, false, true, true);
        assert_eq!(classify(&r, None), Stage::Senior);
    }

    #[test]
    fn override_beats_flags() {
        let r = race(1, 4, Half::First, false, true, true);
        assert_eq!(classify(&r, Some(ScenarioStage::Classic)), Stage::Classic);
    }

    #[test]
    fn no_flags_means_junior() {
        let r = race(1, 10, Half::Second, false, false, false);
        assert_eq!(classify(&r, None), Stage::Junior);
    }

    #[test]
    fn conflicts_match_slot_and_stage() {
        let scenario = race(1, 4, Half::First, false, true, false);
        let same_slot = race(2, 4, Half::First, false, true, false);
        let other_stage = race(3, 4, Half::First, false, false, true);
        let other_slot = race(4, 4, Half::Second, false, true, false);
        let catalog = vec![
            scenario.clone(),
            same_slot.clone(),
            other_stage.clone(),
            other_slot.clone(),
        ];
        let pool = catalog.clone();
        let bindings = vec![ScenarioRace {
            race_id: RaceId(1),
            sequence: 1,
            random_group: None,
            stage_override: None,
        }];
        let conflicts = extract_conflicts(&bindings, &catalog, &pool);
        let ids: Vec<u32> = conflicts.races.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![2]);
        assert!(conflicts.scenario_ids.contains(&RaceId(1)));
    }

    #[test]
    fn conflicts_deduplicate_across_bindings() {
        let scenario_a = race(1, 4, Half::First, false, true, false);
        let scenario_b = race(2, 4, Half::First, false, true, false);
        let shared = race(3, 4, Half::First, false, true, false);
        let catalog = vec![scenario_a, scenario_b, shared];
        let pool = catalog.clone();
        let bindings = vec![
            ScenarioRace {
                race_id: RaceId(1),
                sequence: 1,
                random_group: None,
                stage_override: None,
            },
            ScenarioRace {
                race_id: RaceId(2),
                sequence: 2,
                random_group: None,
                stage_override: None,
            },
        ];
        let conflicts = extract_conflicts(&bindings, &catalog, &pool);
        assert_eq!(conflicts.races.len(), 1);
        assert_eq!(conflicts.races[0].id, RaceId(3));
    }

    #[test]
    fn override_redirects_the_conflict_stage() {
        // Scenario race is classic-flagged but overridden to senior, so it
        // collides with senior races at the slot.
        let scenario = race(1, 6, Half::Second, false, true, false);
        let senior = race(2, 6, Half::Second, false, false, true);
        let classic = race(3, 6, Half::Second, false, true, false);
        let catalog = vec![scenario, senior, classic];
        let pool = catalog.clone();
        let bindings = vec![ScenarioRace {
            race_id: RaceId(1),
            sequence: 1,
            random_group: None,
            stage_override: Some(ScenarioStage::Senior),
        }];
        let conflicts = extract_conflicts(&bindings, &catalog, &pool);
        let ids: Vec<u32> = conflicts.races.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![2]);
    }
}
