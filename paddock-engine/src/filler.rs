//! Slot filling passes applied after the base pattern.
use crate::calendar::{CalendarPlan, ScenarioKind};
use crate::overseas::is_branch_frozen;
use crate::race::{Race, Stage};
use crate::registry::UsedRaceRegistry;
use crate::strategy::ReinforcementStrategy;

fn slot_is_open(plan: &CalendarPlan, stage: Stage, index: usize) -> bool {
    let slot = &plan.track(stage)[index];
    if !slot.is_empty() {
        return false;
    }
    plan.scenario != ScenarioKind::AlternateBranch
        || !is_branch_frozen(stage, slot.month, slot.half)
}

/// Fill empty junior slots with the first unused junior-eligible race at the
/// timing slot. Returns the number of races consumed.
pub fn fill_junior_slots(
    plan: &mut CalendarPlan,
    pool: &[Race],
    registry: &mut UsedRaceRegistry,
) -> usize {
    let mut consumed = 0;
    for index in 0..plan.track(Stage::Junior).len() {
        if !slot_is_open(plan, Stage::Junior, index) {
            continue;
        }
        let (month, half) = {
            let slot = &plan.track(Stage::Junior)[index];
            (slot.month, slot.half)
        };
        let candidate = pool
            .iter()
            .find(|race| !registry.contains(race.id) && race.junior && race.at(month, half));
        if let Some(race) = candidate
            && registry.claim(race.id)
        {
            plan.track_mut(Stage::Junior)[index].assign(race);
            consumed += 1;
        }
    }
    consumed
}

/// Fill empty slots of any stage with races matching the plan's dominant
/// surface and distance. Returns the number of races consumed.
pub fn fill_condition_slots(
    plan: &mut CalendarPlan,
    pool: &[Race],
    registry: &mut UsedRaceRegistry,
) -> usize {
    let surface = plan.surface;
    let distance = plan.distance;
    let mut consumed = 0;
    for stage in Stage::ALL {
        for index in 0..plan.track(stage).len() {
            if !slot_is_open(plan, stage, index) {
                continue;
            }
            let (month, half) = {
                let slot = &plan.track(stage)[index];
                (slot.month, slot.half)
            };
            let candidate = pool.iter().find(|race| {
                !registry.contains(race.id)
                    && race.eligible_for(stage)
                    && race.at(month, half)
                    && race.surface == surface
                    && race.distance == distance
            });
            if let Some(race) = candidate
                && registry.claim(race.id)
            {
                plan.track_mut(stage)[index].assign(race);
                consumed += 1;
            }
        }
    }
    consumed
}

/// Fill any remaining empty slot with any eligible race, repeating until a
/// full sweep adds nothing.
///
/// Candidates per slot prefer strategy-matching races, then lower grade
/// rank, with pool order as the stable tie-break. Returns the number of
/// races consumed.
pub fn fill_any_slots(
    plan: &mut CalendarPlan,
    pool: &[Race],
    strategy: Option<&ReinforcementStrategy>,
    registry: &mut UsedRaceRegistry,
) -> usize {
    let mut consumed = 0;
    loop {
        let mut progressed = false;
        for stage in Stage::ALL {
            for index in 0..plan.track(stage).len() {
                if !slot_is_open(plan, stage, index) {
                    continue;
                }
                let (month, half) = {
                    let slot = &plan.track(stage)[index];
                    (slot.month, slot.half)
                };
                let mut candidates: Vec<&Race> = pool
                    .iter()
                    .filter(|race| {
                        !registry.contains(race.id)
                            && race.eligible_for(stage)
                            && race.at(month, half)
                    })
                    .collect();
                candidates.sort_by_key(|race| {
                    let matches = strategy.is_none_or(|s| s.race_matches(race));
                    (!matches, race.rank.order())
                });
                if let Some(race) = candidates.first()
                    && registry.claim(race.id)
                {
                    plan.track_mut(stage)[index].assign(race);
                    consumed += 1;
                    progressed = true;
                }
            }
        }
        if !progressed {
            break;
        }
    }
    consumed
}
