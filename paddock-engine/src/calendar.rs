//! Calendar plan grid: stage tracks, timing slots, and the serializable
//! plan shape returned to callers.
use serde::{Deserialize, Serialize};

use crate::factors::FactorArray;
use crate::race::{DistanceCategory, Half, Race, Stage, Surface};
use crate::strategy::ReinforcementStrategy;

/// Scenario label attached to a generated plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// Ordinary season built around scenario conflicts.
    Standard,
    /// The overseas alternate branch was taken in this plan.
    AlternateBranch,
    /// Story-following plan seeded with every scenario race.
    Story,
}

impl ScenarioKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::AlternateBranch => "AlternateBranch",
            Self::Story => "Story",
        }
    }
}

impl std::fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One calendar cell. An empty `race_name` means the slot is unfilled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub month: u8,
    pub half: Half,
    #[serde(default)]
    pub race_name: String,
    /// Resolved catalog record when the assignment came from the pool.
    #[serde(skip)]
    pub detail: Option<Race>,
}

impl Slot {
    #[must_use]
    pub const fn new(month: u8, half: Half) -> Self {
        Self {
            month,
            half,
            race_name: String::new(),
            detail: None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.race_name.is_empty()
    }

    /// Assign a pool race, keeping the resolved record for later tallies.
    pub fn assign(&mut self, race: &Race) {
        self.race_name = race.name.clone();
        self.detail = Some(race.clone());
    }

    /// Assign by name only (branch injection for races outside the catalog).
    pub fn assign_named(&mut self, name: &str) {
        self.race_name = name.to_string();
        self.detail = None;
    }

    /// Clear the slot, dropping any assignment.
    pub fn clear(&mut self) {
        self.race_name.clear();
        self.detail = None;
    }
}

/// A full season calendar: Junior 12 slots (months 7-12), Classic and
/// Senior 24 slots each (months 1-12), two halves per month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarPlan {
    pub scenario: ScenarioKind,
    pub junior: Vec<Slot>,
    pub classic: Vec<Slot>,
    pub senior: Vec<Slot>,
    /// Dominant surface across assigned races.
    pub surface: Surface,
    /// Dominant distance bucket across assigned races.
    pub distance: DistanceCategory,
    pub factors: FactorArray,
    pub total_races: usize,
    /// Strategy used while building this plan, if any.
    #[serde(skip)]
    pub strategy: Option<ReinforcementStrategy>,
}

fn track_slots(months: std::ops::RangeInclusive<u8>) -> Vec<Slot> {
    let mut slots = Vec::new();
    for month in months {
        for half in Half::ALL {
            slots.push(Slot::new(month, half));
        }
    }
    slots
}

impl CalendarPlan {
    /// Build an empty plan grid with default derived fields.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            scenario: ScenarioKind::Standard,
            junior: track_slots(7..=12),
            classic: track_slots(1..=12),
            senior: track_slots(1..=12),
            surface: Surface::Turf,
            distance: DistanceCategory::Sprint,
            factors: FactorArray::new(),
            total_races: 0,
            strategy: None,
        }
    }

    #[must_use]
    pub fn track(&self, stage: Stage) -> &[Slot] {
        match stage {
            Stage::Junior => &self.junior,
            Stage::Classic => &self.classic,
            Stage::Senior => &self.senior,
        }
    }

    pub fn track_mut(&mut self, stage: Stage) -> &mut Vec<Slot> {
        match stage {
            Stage::Junior => &mut self.junior,
            Stage::Classic => &mut self.classic,
            Stage::Senior => &mut self.senior,
        }
    }

    /// Mutable access to one timing slot, if the track carries that month.
    pub fn slot_mut(&mut self, stage: Stage, month: u8, half: Half) -> Option<&mut Slot> {
        self.track_mut(stage)
            .iter_mut()
            .find(|slot| slot.month == month && slot.half == half)
    }

    #[must_use]
    pub fn slot(&self, stage: Stage, month: u8, half: Half) -> Option<&Slot> {
        self.track(stage)
            .iter()
            .find(|slot| slot.month == month && slot.half == half)
    }

    /// Whether the given timing slot exists and is unfilled.
    #[must_use]
    pub fn slot_is_empty(&self, stage: Stage, month: u8, half: Half) -> bool {
        self.slot(stage, month, half).is_none_or(Slot::is_empty)
    }

    /// All resolved races currently assigned anywhere in the plan.
    #[must_use]
    pub fn assigned_races(&self) -> Vec<&Race> {
        Stage::ALL
            .iter()
            .flat_map(|stage| self.track(*stage))
            .filter_map(|slot| slot.detail.as_ref())
            .collect()
    }

    /// Recount assigned slots into `total_races`.
    pub fn recount(&mut self) {
        self.total_races = Stage::ALL
            .iter()
            .flat_map(|stage| self.track(*stage))
            .filter(|slot| !slot.is_empty())
            .count();
    }

    /// Recompute the dominant surface and distance from assigned races.
    /// All-empty plans fall back to Turf / Sprint.
    pub fn refresh_dominant_conditions(&mut self) {
        let mut surface_count = [0usize; 2];
        let mut distance_count = [0usize; 4];
        for race in self.assigned_races() {
            surface_count[race.surface.id() as usize] += 1;
            distance_count[race.distance.id() as usize - 1] += 1;
        }

        self.surface = Surface::Turf;
        let mut best = 0;
        for surface in Surface::ALL {
            let count = surface_count[surface.id() as usize];
            if count > best {
                best = count;
                self.surface = surface;
            }
        }

        self.distance = DistanceCategory::Sprint;
        let mut best = 0;
        for distance in DistanceCategory::ALL {
            let count = distance_count[distance.id() as usize - 1];
            if count > best {
                best = count;
                self.distance = distance;
            }
        }
    }
}
