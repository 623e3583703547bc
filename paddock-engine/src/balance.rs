//! Post-pass that spreads long consecutive race runs across a track.
use crate::calendar::CalendarPlan;
use crate::race::Stage;

/// Run length at which a track gets rearranged.
const RUN_TRIGGER: usize = 4;
/// Leading races of a rearranged run that stay in place.
const KEPT_PREFIX: usize = 2;

/// Relax runs of four or more consecutive races in every track.
///
/// The first two races of such a run stay; the third and later move into
/// empty slots after the run, latest slot first. Opt-in: the orchestrator's
/// output is unbalanced.
pub fn balance_plan(plan: &mut CalendarPlan) {
    for stage in Stage::ALL {
        balance_track(plan, stage);
    }
    plan.recount();
}

fn balance_track(plan: &mut CalendarPlan, stage: Stage) {
    let len = plan.track(stage).len();
    let mut start = 0;
    while start < len {
        if plan.track(stage)[start].is_empty() {
            start += 1;
            continue;
        }
        let mut end = start;
        while end + 1 < len && !plan.track(stage)[end + 1].is_empty() {
            end += 1;
        }
        let run_len = end - start + 1;
        if run_len >= RUN_TRIGGER {
            relocate_overflow(plan, stage, start + KEPT_PREFIX, end);
        }
        start = end + 1;
    }
}

/// Move the slots in `overflow_start..=run_end` into empty slots after the
/// run, filling from the latest empty slot backwards.
fn relocate_overflow(plan: &mut CalendarPlan, stage: Stage, overflow_start: usize, run_end: usize) {
    let len = plan.track(stage).len();
    let mut target = len;
    for source in overflow_start..=run_end {
        let Some(found) = (run_end + 1..target)
            .rev()
            .find(|index| plan.track(stage)[*index].is_empty())
        else {
            return;
        };
        target = found;
        let moved = plan.track_mut(stage)[source].clone();
        let track = plan.track_mut(stage);
        track[target].race_name = moved.race_name;
        track[target].detail = moved.detail;
        track[source].clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::race::Half;

    fn fill(plan: &mut CalendarPlan, stage: Stage, month: u8, half: Half, name: &str) {
        plan.slot_mut(stage, month, half).unwrap().assign_named(name);
    }

    fn names(plan: &CalendarPlan, stage: Stage) -> Vec<(u8, Half, String)> {
        plan.track(stage)
            .iter()
            .filter(|slot| !slot.is_empty())
            .map(|slot| (slot.month, slot.half, slot.race_name.clone()))
            .collect()
    }

    #[test]
    fn short_runs_are_left_alone() {
        let mut plan = CalendarPlan::empty();
        fill(&mut plan, Stage::Classic, 1, Half::First, "A");
        fill(&mut plan, Stage::Classic, 1, Half::Second, "B");
        fill(&mut plan, Stage::Classic, 2, Half::First, "C");
        let before = names(&plan, Stage::Classic);
        balance_plan(&mut plan);
        assert_eq!(names(&plan, Stage::Classic), before);
    }

    #[test]
    fn long_run_overflow_moves_to_the_latest_empties() {
        let mut plan = CalendarPlan::empty();
        fill(&mut plan, Stage::Classic, 1, Half::First, "A");
        fill(&mut plan, Stage::Classic, 1, Half::Second, "B");
        fill(&mut plan, Stage::Classic, 2, Half::First, "C");
        fill(&mut plan, Stage::Classic, 2, Half::Second, "D");
        fill(&mut plan, Stage::Classic, 3, Half::First, "E");
        balance_plan(&mut plan);

        // First two stay; C, D and E land in the latest empty slots.
        assert_eq!(
            plan.slot(Stage::Classic, 1, Half::Second).unwrap().race_name,
            "B"
        );
        assert!(plan.slot_is_empty(Stage::Classic, 2, Half::First));
        assert!(plan.slot_is_empty(Stage::Classic, 2, Half::Second));
        assert!(plan.slot_is_empty(Stage::Classic, 3, Half::First));
        assert_eq!(
            plan.slot(Stage::Classic, 12, Half::Second).unwrap().race_name,
            "C"
        );
        assert_eq!(
            plan.slot(Stage::Classic, 12, Half::First).unwrap().race_name,
            "D"
        );
        assert_eq!(
            plan.slot(Stage::Classic, 11, Half::Second).unwrap().race_name,
            "E"
        );
    }

    #[test]
    fn run_of_four_keeps_only_the_first_two() {
        let mut plan = CalendarPlan::empty();
        fill(&mut plan, Stage::Classic, 1, Half::First, "A");
        fill(&mut plan, Stage::Classic, 1, Half::Second, "B");
        fill(&mut plan, Stage::Classic, 2, Half::First, "C");
        fill(&mut plan, Stage::Classic, 2, Half::Second, "D");
        balance_plan(&mut plan);

        assert!(plan.slot_is_empty(Stage::Classic, 2, Half::First));
        assert!(plan.slot_is_empty(Stage::Classic, 2, Half::Second));
        assert_eq!(
            plan.slot(Stage::Classic, 12, Half::Second).unwrap().race_name,
            "C"
        );
        assert_eq!(
            plan.slot(Stage::Classic, 12, Half::First).unwrap().race_name,
            "D"
        );
    }

    #[test]
    fn balancing_preserves_the_race_multiset() {
        let mut plan = CalendarPlan::empty();
        for (month, half, name) in [
            (4, Half::First, "A"),
            (4, Half::Second, "B"),
            (5, Half::First, "C"),
            (5, Half::Second, "D"),
            (6, Half::First, "E"),
            (6, Half::Second, "F"),
        ] {
            fill(&mut plan, Stage::Senior, month, half, name);
        }
        plan.recount();
        let total_before = plan.total_races;
        let mut before: Vec<String> = names(&plan, Stage::Senior)
            .into_iter()
            .map(|(_, _, name)| name)
            .collect();
        before.sort();

        balance_plan(&mut plan);
        let mut after: Vec<String> = names(&plan, Stage::Senior)
            .into_iter()
            .map(|(_, _, name)| name)
            .collect();
        after.sort();
        assert_eq!(before, after);
        assert_eq!(plan.total_races, total_before);
    }

    #[test]
    fn no_new_long_runs_appear() {
        let mut plan = CalendarPlan::empty();
        for (month, half) in [
            (1, Half::First),
            (1, Half::Second),
            (2, Half::First),
            (2, Half::Second),
            (3, Half::First),
        ] {
            fill(&mut plan, Stage::Classic, month, half, "R");
        }
        balance_plan(&mut plan);

        let mut longest = 0;
        let mut current = 0;
        for slot in plan.track(Stage::Classic) {
            if slot.is_empty() {
                current = 0;
            } else {
                current += 1;
                longest = longest.max(current);
            }
        }
        assert!(longest <= 3, "run of {longest} survived balancing");
    }
}
