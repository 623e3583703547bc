//! Overseas alternate branch: eligibility, injection, and frozen windows.
use crate::calendar::{CalendarPlan, ScenarioKind};
use crate::race::{Half, Race, Stage};
use crate::registry::UsedRaceRegistry;

pub const JAPANESE_DERBY: &str = "Japanese Derby";
pub const PRIX_NIEL: &str = "Prix Niel";
pub const PRIX_FOY: &str = "Prix Foy";
pub const ARC_DE_TRIOMPHE: &str = "Arc de Triomphe";
pub const TAKARAZUKA_KINEN: &str = "Takarazuka Kinen";

/// Races reserved at invocation start so ordinary filling never takes them.
pub const RESERVED_ANCHORS: [&str; 4] =
    [PRIX_NIEL, PRIX_FOY, ARC_DE_TRIOMPHE, TAKARAZUKA_KINEN];

/// The six branch placements: stage, month, half, race name.
const BRANCH_RACES: [(Stage, u8, Half, &str); 6] = [
    (Stage::Classic, 5, Half::Second, JAPANESE_DERBY),
    (Stage::Classic, 9, Half::First, PRIX_NIEL),
    (Stage::Classic, 10, Half::First, ARC_DE_TRIOMPHE),
    (Stage::Senior, 6, Half::Second, TAKARAZUKA_KINEN),
    (Stage::Senior, 9, Half::First, PRIX_FOY),
    (Stage::Senior, 10, Half::First, ARC_DE_TRIOMPHE),
];

/// Whether the plan's late-season windows are clear enough to branch.
#[must_use]
pub fn branch_eligible(plan: &CalendarPlan) -> bool {
    for month in 7..=9 {
        for half in Half::ALL {
            if !plan.slot_is_empty(Stage::Classic, month, half) {
                return false;
            }
        }
    }
    if !plan.slot_is_empty(Stage::Classic, 10, Half::First) {
        return false;
    }

    if !plan.slot_is_empty(Stage::Senior, 6, Half::Second) {
        return false;
    }
    for month in 7..=12 {
        for half in Half::ALL {
            if !plan.slot_is_empty(Stage::Senior, month, half) {
                return false;
            }
        }
    }

    // The derby slot may already hold the derby itself.
    plan.slot(Stage::Classic, 5, Half::Second)
        .is_none_or(|slot| slot.is_empty() || slot.race_name == JAPANESE_DERBY)
}

/// Inject the six branch races into their (empty) slots and mark the plan.
///
/// Returns the number of slots newly filled. Catalog entries matching by
/// name are resolved so tallies see the branch races; their ids are claimed
/// in the registry.
pub fn inject_branch_races(
    plan: &mut CalendarPlan,
    catalog: &[Race],
    registry: &mut UsedRaceRegistry,
) -> usize {
    let mut injected = 0;
    for (stage, month, half, name) in BRANCH_RACES {
        let Some(slot) = plan.slot_mut(stage, month, half) else {
            continue;
        };
        if !slot.is_empty() {
            continue;
        }
        if let Some(race) = catalog.iter().find(|race| race.name == name) {
            slot.assign(race);
            registry.reserve(race.id);
        } else {
            slot.assign_named(name);
        }
        injected += 1;
    }
    if injected > 0 {
        plan.scenario = ScenarioKind::AlternateBranch;
    }
    injected
}

/// Slots the ordinary fillers must not touch on a branch plan.
#[must_use]
pub const fn is_branch_frozen(stage: Stage, month: u8, half: Half) -> bool {
    match stage {
        Stage::Junior => false,
        Stage::Classic => matches!(month, 7..=10),
        Stage::Senior => month >= 7 || matches!((month, half), (6, Half::Second)),
    }
}
