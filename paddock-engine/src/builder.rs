//! Base pattern construction from scenario conflicts.
use crate::calendar::CalendarPlan;
use crate::classify::{classify, ConflictSet};
use crate::preference::PreferredConditions;
use crate::race::{Race, Stage};
use crate::registry::UsedRaceRegistry;

/// Seed a plan from the conflict pool, slot by slot, returning the number of
/// races consumed.
///
/// Junior slots take the first unused junior-eligible conflict at the slot.
/// Classic and Senior slots sort candidates toward the preferred surface and
/// distance, with the stable numeric ids as the final tie-break.
pub fn build_base_pattern(
    plan: &mut CalendarPlan,
    conflicts: &ConflictSet,
    preferred: PreferredConditions,
    registry: &mut UsedRaceRegistry,
) -> usize {
    let mut consumed = 0;

    for stage in Stage::ALL {
        for index in 0..plan.track(stage).len() {
            let (month, half) = {
                let slot = &plan.track(stage)[index];
                if !slot.is_empty() {
                    continue;
                }
                (slot.month, slot.half)
            };

            let mut candidates: Vec<&Race> = conflicts
                .races
                .iter()
                .filter(|race| !registry.contains(race.id) && race.at(month, half))
                .filter(|race| match stage {
                    Stage::Junior => race.junior,
                    _ => classify(race, None) == stage,
                })
                .collect();

            if stage != Stage::Junior {
                candidates.sort_by_key(|race| {
                    (
                        race.surface != preferred.surface,
                        race.distance != preferred.distance,
                        race.surface.id(),
                        race.distance.id(),
                    )
                });
            }

            if let Some(race) = candidates.first()
                && registry.claim(race.id)
            {
                plan.track_mut(stage)[index].assign(race);
                consumed += 1;
            }
        }
    }

    consumed
}
