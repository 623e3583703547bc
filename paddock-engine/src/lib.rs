//! Paddock Planning Engine
//!
//! Platform-agnostic career planning logic for the Paddock racing companion.
//! This crate turns a character's aptitude profile and remaining race pool
//! into full-season calendar plans, factor compositions, and career-count
//! estimates, without UI or storage dependencies.

pub mod aptitude;
pub mod balance;
pub mod breeding;
pub mod builder;
pub mod calendar;
pub mod classify;
pub mod factors;
pub mod filler;
pub mod overseas;
pub mod planner;
pub mod preference;
pub mod race;
pub mod recommend;
pub mod registry;
pub mod store;
pub mod strategy;
pub mod summary;

// Re-export commonly used types
pub use aptitude::{AptitudeProfile, Grade};
pub use balance::balance_plan;
pub use breeding::estimate_breeding_count;
pub use builder::build_base_pattern;
pub use calendar::{CalendarPlan, ScenarioKind, Slot};
pub use classify::{ConflictSet, classify, extract_conflicts};
pub use factors::{FACTOR_SLOTS, Factor, FactorArray, default_factors, strategy_factors};
pub use filler::{fill_any_slots, fill_condition_slots, fill_junior_slots};
pub use overseas::{RESERVED_ANCHORS, branch_eligible, inject_branch_races};
pub use planner::{MAX_PLAN_ITERATIONS, PlanError, PlanSet, StopReason, plan_calendars};
pub use preference::{PreferredConditions, select_preferred};
pub use race::{
    DistanceCategory, Half, Race, RaceId, RaceRank, ScenarioRace, ScenarioStage, Stage, Surface,
};
pub use recommend::{ScenarioChoice, ScenarioRecommendation, recommend_scenario};
pub use registry::UsedRaceRegistry;
pub use store::{MemoryStore, StoreFixture};
pub use strategy::{ReinforcementStrategy, StrategyCategory, build_strategies, filter_pool};
pub use summary::{RemainingSummary, summarize_remaining};

use serde::{Deserialize, Serialize};

/// Identifier of an account owning race records.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct UserId(pub u32);

/// Identifier of a playable character.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct CharacterId(pub u32);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trait for abstracting race data access
/// Platform-specific implementations should provide this
pub trait RaceStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Graded races the character has not run yet, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns an error if the race data cannot be loaded.
    fn remaining_races(
        &self,
        user: UserId,
        character: CharacterId,
    ) -> Result<Vec<Race>, Self::Error>;

    /// Story-mandated race bindings for the character.
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario data cannot be loaded.
    fn scenario_races(&self, character: CharacterId) -> Result<Vec<ScenarioRace>, Self::Error>;

    /// The full G1-G3 catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the race data cannot be loaded.
    fn graded_catalog(&self) -> Result<Vec<Race>, Self::Error>;

    /// Aptitude profile of the character, if registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile data cannot be loaded.
    fn aptitude_profile(
        &self,
        character: CharacterId,
    ) -> Result<Option<AptitudeProfile>, Self::Error>;

    /// Ids of races the user has already run with the character.
    ///
    /// # Errors
    ///
    /// Returns an error if the run records cannot be loaded.
    fn run_race_ids(
        &self,
        user: UserId,
        character: CharacterId,
    ) -> Result<Vec<RaceId>, Self::Error>;
}

/// Planning engine over a race store.
pub struct PlannerEngine<S>
where
    S: RaceStore,
{
    store: S,
}

impl<S> PlannerEngine<S>
where
    S: RaceStore,
    S::Error: Into<anyhow::Error>,
{
    /// Create a new engine over the provided store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    fn load_profile(&self, character: CharacterId) -> Result<AptitudeProfile, PlanError> {
        self.store
            .aptitude_profile(character)
            .map_err(|e| PlanError::Store(e.into()))?
            .ok_or(PlanError::CharacterNotFound { character })
    }

    /// Generate calendar plans for the character.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::CharacterNotFound`] when the character has no
    /// profile, or [`PlanError::Store`] when the store fails.
    pub fn plan_calendars(
        &self,
        count_hint: usize,
        user: UserId,
        character: CharacterId,
    ) -> Result<PlanSet, PlanError> {
        let profile = self.load_profile(character)?;
        let remaining = self
            .store
            .remaining_races(user, character)
            .map_err(|e| PlanError::Store(e.into()))?;
        let bindings = self
            .store
            .scenario_races(character)
            .map_err(|e| PlanError::Store(e.into()))?;
        let catalog = self
            .store
            .graded_catalog()
            .map_err(|e| PlanError::Store(e.into()))?;
        Ok(planner::plan_calendars(
            &profile, &remaining, &bindings, &catalog, count_hint,
        ))
    }

    /// Estimate how many careers are needed to clear the remaining pool.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Store`] when the store fails.
    pub fn estimate_breeding_count(
        &self,
        user: UserId,
        character: CharacterId,
    ) -> Result<u32, PlanError> {
        let remaining = self
            .store
            .remaining_races(user, character)
            .map_err(|e| PlanError::Store(e.into()))?;
        let bindings = self
            .store
            .scenario_races(character)
            .map_err(|e| PlanError::Store(e.into()))?;
        let catalog = self
            .store
            .graded_catalog()
            .map_err(|e| PlanError::Store(e.into()))?;
        Ok(estimate_breeding_count(&bindings, &catalog, &remaining))
    }

    /// Tally the character's remaining races per surface and distance.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Store`] when the store fails.
    pub fn remaining_summary(
        &self,
        user: UserId,
        character: CharacterId,
    ) -> Result<RemainingSummary, PlanError> {
        let remaining = self
            .store
            .remaining_races(user, character)
            .map_err(|e| PlanError::Store(e.into()))?;
        Ok(summarize_remaining(&remaining))
    }

    /// Recommend the next scenario and factor loadout.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::CharacterNotFound`] when the character has no
    /// profile, or [`PlanError::Store`] when the store fails.
    pub fn recommend_scenario(
        &self,
        user: UserId,
        character: CharacterId,
    ) -> Result<ScenarioRecommendation, PlanError> {
        let profile = self.load_profile(character)?;
        let remaining = self
            .store
            .remaining_races(user, character)
            .map_err(|e| PlanError::Store(e.into()))?;
        let bindings = self
            .store
            .scenario_races(character)
            .map_err(|e| PlanError::Store(e.into()))?;
        let catalog = self
            .store
            .graded_catalog()
            .map_err(|e| PlanError::Store(e.into()))?;
        Ok(recommend_scenario(&profile, &bindings, &catalog, &remaining))
    }
}
