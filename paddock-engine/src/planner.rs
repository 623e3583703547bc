//! Plan orchestrator: turns a profile plus the remaining race pool into an
//! ordered set of calendar plans.
use thiserror::Error;

use crate::aptitude::AptitudeProfile;
use crate::builder::build_base_pattern;
use crate::calendar::{CalendarPlan, ScenarioKind};
use crate::classify::{classify, extract_conflicts};
use crate::factors::{default_factors, strategy_factors};
use crate::filler::{fill_any_slots, fill_condition_slots, fill_junior_slots};
use crate::overseas::{branch_eligible, inject_branch_races, RESERVED_ANCHORS};
use crate::preference::select_preferred;
use crate::race::{Race, ScenarioRace};
use crate::registry::UsedRaceRegistry;
use crate::strategy::{build_strategies, filter_pool};
use crate::CharacterId;

/// Hard upper bound on planning iterations; the progress check is the real
/// termination guarantee.
pub const MAX_PLAN_ITERATIONS: usize = 20;

/// Fatal planning failures. Everything else degrades to smaller output.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("character {character} has no aptitude profile")]
    CharacterNotFound { character: CharacterId },
    #[error("race store failure")]
    Store(#[source] anyhow::Error),
}

/// Why the planning loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// An iteration consumed nothing new.
    FixedPoint,
    /// The iteration cap cut the loop short.
    IterationCapReached,
}

/// Ordered plans plus the loop outcome and a per-iteration trace.
#[derive(Debug, Clone)]
pub struct PlanSet {
    pub plans: Vec<CalendarPlan>,
    pub stop: StopReason,
    pub logs: Vec<String>,
}

/// Generate calendar plans until the pool stops yielding new races.
///
/// `count_hint` caps the number of loop iterations (itself clamped to
/// [`MAX_PLAN_ITERATIONS`]). When scenario bindings exist, one story plan is
/// appended after the loop regardless of how it stopped.
#[must_use]
pub fn plan_calendars(
    profile: &AptitudeProfile,
    remaining: &[Race],
    bindings: &[ScenarioRace],
    catalog: &[Race],
    count_hint: usize,
) -> PlanSet {
    let cap = count_hint.clamp(1, MAX_PLAN_ITERATIONS);
    let strategies = build_strategies(profile);
    let mut registry = UsedRaceRegistry::new();
    for binding in bindings {
        registry.reserve(binding.race_id);
    }
    for race in remaining {
        if RESERVED_ANCHORS.contains(&race.name.as_str()) {
            registry.reserve(race.id);
        }
    }

    let mut plans: Vec<CalendarPlan> = Vec::new();
    let mut logs: Vec<String> = Vec::new();
    // The branch is only worth taking while its anchors are still unrun.
    let mut branch_taken = !remaining
        .iter()
        .any(|race| RESERVED_ANCHORS.contains(&race.name.as_str()));
    let mut stop = StopReason::IterationCapReached;

    for iteration in 0..cap {
        let strategy = strategies[iteration % strategies.len()].as_ref();
        let pool = filter_pool(remaining, strategy, profile);
        let conflicts = extract_conflicts(bindings, catalog, &pool);
        let preferred = select_preferred(&conflicts, &registry, profile);

        let mut plan = CalendarPlan::empty();
        plan.strategy = strategy.cloned();
        let mut consumed = build_base_pattern(&mut plan, &conflicts, preferred, &mut registry);

        let mut branched_now = false;
        if !branch_taken && branch_eligible(&plan) {
            let injected = inject_branch_races(&mut plan, catalog, &mut registry);
            if injected > 0 {
                branch_taken = true;
                branched_now = true;
                consumed += injected;
            }
        }

        plan.refresh_dominant_conditions();
        consumed += fill_junior_slots(&mut plan, &pool, &mut registry);
        consumed += fill_condition_slots(&mut plan, &pool, &mut registry);
        consumed += fill_any_slots(&mut plan, &pool, strategy, &mut registry);

        plan.refresh_dominant_conditions();
        plan.factors = match strategy {
            Some(strategy) => strategy_factors(strategy),
            None => default_factors(profile, &plan.assigned_races()),
        };
        plan.recount();

        if consumed == 0 && !branched_now {
            stop = StopReason::FixedPoint;
            logs.push(format!("iteration {iteration}: no progress, stopping"));
            break;
        }
        logs.push(format!(
            "iteration {iteration}: {consumed} races consumed, scenario {}",
            plan.scenario
        ));
        plans.push(plan);
    }
    if stop == StopReason::IterationCapReached {
        logs.push(format!("iteration cap {cap} reached"));
    }

    if !bindings.is_empty() {
        plans.push(build_story_plan(
            profile,
            remaining,
            bindings,
            catalog,
            &mut registry,
        ));
        logs.push("story plan appended".to_string());
    }

    PlanSet { plans, stop, logs }
}

/// One plan that follows the story schedule exactly: every scenario race at
/// its natural slot, remaining holes filled from the unfiltered pool. The
/// invocation registry is shared so no pool race repeats across plans.
fn build_story_plan(
    profile: &AptitudeProfile,
    remaining: &[Race],
    bindings: &[ScenarioRace],
    catalog: &[Race],
    registry: &mut UsedRaceRegistry,
) -> CalendarPlan {
    let mut plan = CalendarPlan::empty();
    plan.scenario = ScenarioKind::Story;

    for binding in bindings {
        let Some(race) = catalog.iter().find(|race| race.id == binding.race_id) else {
            continue;
        };
        let stage = classify(race, binding.stage_override);
        if let Some(slot) = plan.slot_mut(stage, race.month, race.half)
            && slot.is_empty()
        {
            slot.assign(race);
            registry.reserve(race.id);
        }
    }

    fill_any_slots(&mut plan, remaining, None, registry);
    plan.refresh_dominant_conditions();
    plan.factors = default_factors(profile, &plan.assigned_races());
    plan.recount();
    plan
}
