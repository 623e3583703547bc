//! End-to-end coverage of the planning engine over an in-memory store.
use std::collections::{HashMap, HashSet};

use paddock_engine::{
    AptitudeProfile, CharacterId, DistanceCategory, Factor, Grade, Half, MemoryStore, PlanError,
    PlannerEngine, Race, RaceId, RaceRank, ScenarioKind, ScenarioRace, Stage, StoreFixture,
    Surface, UserId, balance_plan,
};

const USER: UserId = UserId(1);
const CHARACTER: CharacterId = CharacterId(10);

#[allow(clippy::too_many_arguments)]
fn race(
    id: u32,
    name: &str,
    surface: Surface,
    distance: DistanceCategory,
    month: u8,
    half: Half,
    rank: RaceRank,
    stages: (bool, bool, bool),
) -> Race {
    Race {
        id: RaceId(id),
        name: name.to_string(),
        surface,
        distance,
        month,
        half,
        rank,
        junior: stages.0,
        classic: stages.1,
        senior: stages.2,
        branch_only: false,
    }
}

fn strong_profile() -> AptitudeProfile {
    AptitudeProfile {
        turf: Grade::A,
        dirt: Grade::A,
        sprint: Grade::A,
        mile: Grade::A,
        middle: Grade::A,
        long: Grade::A,
        ..AptitudeProfile::default()
    }
}

fn fixture(races: Vec<Race>, profile: AptitudeProfile, scenarios: Vec<ScenarioRace>) -> StoreFixture {
    let mut profiles = HashMap::new();
    profiles.insert(CHARACTER.0, profile);
    let mut scenario_map = HashMap::new();
    if !scenarios.is_empty() {
        scenario_map.insert(CHARACTER.0, scenarios);
    }
    StoreFixture {
        races,
        profiles,
        scenarios: scenario_map,
        runs: HashMap::new(),
    }
}

fn sample_catalog() -> Vec<Race> {
    vec![
        race(1, "Junior Stakes", Surface::Turf, DistanceCategory::Mile, 10, Half::First, RaceRank::G3, (true, false, false)),
        race(2, "Winter Mile", Surface::Turf, DistanceCategory::Mile, 1, Half::Second, RaceRank::G2, (false, true, false)),
        race(3, "Spring Cup", Surface::Turf, DistanceCategory::Middle, 4, Half::First, RaceRank::G1, (false, true, false)),
        race(4, "Spring Trial", Surface::Turf, DistanceCategory::Middle, 4, Half::First, RaceRank::G2, (false, true, false)),
        race(5, "Dirt Derby", Surface::Dirt, DistanceCategory::Mile, 2, Half::First, RaceRank::G3, (false, true, true)),
        race(6, "Autumn Shield", Surface::Turf, DistanceCategory::Long, 11, Half::Second, RaceRank::G1, (false, true, true)),
        race(7, "New Year Cup", Surface::Turf, DistanceCategory::Middle, 1, Half::First, RaceRank::G2, (false, false, true)),
        race(8, "Prix Niel", Surface::Turf, DistanceCategory::Middle, 9, Half::First, RaceRank::G2, (false, true, false)),
        race(9, "Arc de Triomphe", Surface::Turf, DistanceCategory::Middle, 10, Half::First, RaceRank::G1, (false, true, true)),
        race(10, "Prix Foy", Surface::Turf, DistanceCategory::Middle, 9, Half::First, RaceRank::G2, (false, false, true)),
        race(11, "Takarazuka Kinen", Surface::Turf, DistanceCategory::Middle, 6, Half::Second, RaceRank::G1, (false, false, true)),
    ]
}

#[test]
fn plans_never_share_a_pool_race() {
    let engine = PlannerEngine::new(MemoryStore::new(fixture(
        sample_catalog(),
        strong_profile(),
        vec![],
    )));
    let set = engine.plan_calendars(10, USER, CHARACTER).unwrap();
    assert!(!set.plans.is_empty());

    // A race may legitimately occupy two slots of the branch plan (the
    // overseas finale runs in both years), so compare per-plan id sets.
    let mut seen: HashSet<RaceId> = HashSet::new();
    for plan in &set.plans {
        let ids: HashSet<RaceId> = plan.assigned_races().iter().map(|r| r.id).collect();
        for id in ids {
            assert!(seen.insert(id), "race {id:?} shared across plans");
        }
    }
}

#[test]
fn every_plan_carries_exactly_six_factors() {
    let engine = PlannerEngine::new(MemoryStore::new(fixture(
        sample_catalog(),
        strong_profile(),
        vec![],
    )));
    let set = engine.plan_calendars(10, USER, CHARACTER).unwrap();
    for plan in &set.plans {
        assert_eq!(plan.factors.len(), 6);
    }
}

#[test]
fn branch_anchors_appear_in_exactly_one_plan() {
    let engine = PlannerEngine::new(MemoryStore::new(fixture(
        sample_catalog(),
        strong_profile(),
        vec![],
    )));
    let set = engine.plan_calendars(10, USER, CHARACTER).unwrap();

    let branch_plans: Vec<_> = set
        .plans
        .iter()
        .filter(|plan| plan.scenario == ScenarioKind::AlternateBranch)
        .collect();
    assert_eq!(branch_plans.len(), 1);

    let mut niel_count = 0;
    for plan in &set.plans {
        for stage in Stage::ALL {
            for slot in plan.track(stage) {
                if slot.race_name == "Prix Niel" {
                    niel_count += 1;
                }
            }
        }
    }
    assert_eq!(niel_count, 1);

    // The branch plan holds the anchor at its designated slot.
    let branch = branch_plans[0];
    let slot = branch.slot(Stage::Classic, 9, Half::First).unwrap();
    assert_eq!(slot.race_name, "Prix Niel");
}

#[test]
fn anchors_are_reserved_from_ordinary_filling() {
    // Without the branch, the anchors would be ordinary pool races; no
    // standard plan may pick them up.
    let engine = PlannerEngine::new(MemoryStore::new(fixture(
        sample_catalog(),
        strong_profile(),
        vec![],
    )));
    let set = engine.plan_calendars(10, USER, CHARACTER).unwrap();
    for plan in set
        .plans
        .iter()
        .filter(|plan| plan.scenario == ScenarioKind::Standard)
    {
        for placed in plan.assigned_races() {
            assert!(
                !paddock_engine::RESERVED_ANCHORS.contains(&placed.name.as_str()),
                "anchor {} leaked into a standard plan",
                placed.name
            );
        }
    }
}

#[test]
fn scenario_bindings_produce_a_story_plan_last() {
    let bindings = vec![ScenarioRace {
        race_id: RaceId(3),
        sequence: 1,
        random_group: None,
        stage_override: None,
    }];
    let engine = PlannerEngine::new(MemoryStore::new(fixture(
        sample_catalog(),
        strong_profile(),
        bindings,
    )));
    let set = engine.plan_calendars(10, USER, CHARACTER).unwrap();
    let story = set.plans.last().unwrap();
    assert_eq!(story.scenario, ScenarioKind::Story);
    let slot = story.slot(Stage::Classic, 4, Half::First).unwrap();
    assert_eq!(slot.race_name, "Spring Cup");

    // The scenario race never shows up in any other plan.
    for plan in &set.plans[..set.plans.len() - 1] {
        assert!(plan.assigned_races().iter().all(|r| r.id != RaceId(3)));
    }
}

#[test]
fn weak_profile_reinforcement_factors() {
    // Dirt at G with Sprint at D: the dirt weakness is served first.
    let profile = AptitudeProfile {
        turf: Grade::A,
        dirt: Grade::G,
        sprint: Grade::D,
        mile: Grade::A,
        middle: Grade::A,
        long: Grade::A,
        ..AptitudeProfile::default()
    };
    let catalog = vec![
        race(1, "Dirt Dash", Surface::Dirt, DistanceCategory::Sprint, 2, Half::First, RaceRank::G3, (false, true, false)),
        race(2, "Turf Dash", Surface::Turf, DistanceCategory::Sprint, 3, Half::First, RaceRank::G3, (false, true, false)),
    ];
    let engine = PlannerEngine::new(MemoryStore::new(fixture(catalog, profile, vec![])));
    let set = engine.plan_calendars(10, USER, CHARACTER).unwrap();

    let strategy_plan = set
        .plans
        .iter()
        .find(|plan| plan.strategy.is_some())
        .expect("a reinforcement strategy plan");
    assert_eq!(
        strategy_plan.factors.iter().filter(|f| **f == Factor::Dirt).count(),
        3
    );
    assert_eq!(
        strategy_plan.factors.iter().filter(|f| **f == Factor::Sprint).count(),
        3
    );
}

#[test]
fn breeding_count_is_at_least_one() {
    let engine = PlannerEngine::new(MemoryStore::new(fixture(
        vec![],
        strong_profile(),
        vec![],
    )));
    assert_eq!(engine.estimate_breeding_count(USER, CHARACTER).unwrap(), 1);
}

#[test]
fn stacked_slots_raise_the_breeding_count() {
    let catalog = vec![
        race(1, "Cup A", Surface::Turf, DistanceCategory::Mile, 4, Half::First, RaceRank::G1, (false, true, false)),
        race(2, "Cup B", Surface::Turf, DistanceCategory::Mile, 4, Half::First, RaceRank::G2, (false, true, false)),
        race(3, "Cup C", Surface::Turf, DistanceCategory::Mile, 4, Half::First, RaceRank::G3, (false, true, false)),
    ];
    let engine = PlannerEngine::new(MemoryStore::new(fixture(catalog, strong_profile(), vec![])));
    assert_eq!(engine.estimate_breeding_count(USER, CHARACTER).unwrap(), 3);
}

#[test]
fn missing_profile_fails_fast() {
    let engine = PlannerEngine::new(MemoryStore::new(StoreFixture {
        races: sample_catalog(),
        ..StoreFixture::default()
    }));
    let err = engine.plan_calendars(3, USER, CHARACTER).unwrap_err();
    assert!(matches!(err, PlanError::CharacterNotFound { .. }));
    // Profile-free analyses still work.
    assert!(engine.remaining_summary(USER, CHARACTER).unwrap().total > 0);
}

#[test]
fn balanced_plans_keep_their_races() {
    let engine = PlannerEngine::new(MemoryStore::new(fixture(
        sample_catalog(),
        strong_profile(),
        vec![],
    )));
    let set = engine.plan_calendars(10, USER, CHARACTER).unwrap();
    for plan in &set.plans {
        let mut balanced = plan.clone();
        balance_plan(&mut balanced);
        assert_eq!(balanced.total_races, plan.total_races);
    }
}
