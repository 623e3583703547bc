//! In-memory race store backed by a JSON fixture.
use std::collections::HashMap;
use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::aptitude::AptitudeProfile;
use crate::race::{Race, RaceId, ScenarioRace};
use crate::{CharacterId, RaceStore, UserId};

/// Serializable fixture feeding a [`MemoryStore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreFixture {
    /// Full race catalog, all ranks.
    #[serde(default)]
    pub races: Vec<Race>,
    /// Aptitude profiles keyed by character id.
    #[serde(default)]
    pub profiles: HashMap<u32, AptitudeProfile>,
    /// Scenario bindings keyed by character id.
    #[serde(default)]
    pub scenarios: HashMap<u32, Vec<ScenarioRace>>,
    /// Already-run race ids keyed by "user:character".
    #[serde(default)]
    pub runs: HashMap<String, Vec<RaceId>>,
}

/// [`RaceStore`] over pre-loaded data, for tests and the tester binary.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    fixture: StoreFixture,
}

impl MemoryStore {
    #[must_use]
    pub const fn new(fixture: StoreFixture) -> Self {
        Self { fixture }
    }

    /// Parse a fixture from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error when the JSON does not match the fixture shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self::new)
    }

    fn run_key(user: UserId, character: CharacterId) -> String {
        format!("{}:{}", user.0, character.0)
    }
}

impl RaceStore for MemoryStore {
    type Error = Infallible;

    fn remaining_races(
        &self,
        user: UserId,
        character: CharacterId,
    ) -> Result<Vec<Race>, Self::Error> {
        let run = self.run_race_ids(user, character)?;
        Ok(self
            .fixture
            .races
            .iter()
            .filter(|race| race.rank.is_graded() && !run.contains(&race.id))
            .cloned()
            .collect())
    }

    fn scenario_races(&self, character: CharacterId) -> Result<Vec<ScenarioRace>, Self::Error> {
        Ok(self
            .fixture
            .scenarios
            .get(&character.0)
            .cloned()
            .unwrap_or_default())
    }

    fn graded_catalog(&self) -> Result<Vec<Race>, Self::Error> {
        Ok(self
            .fixture
            .races
            .iter()
            .filter(|race| race.rank.is_graded())
            .cloned()
            .collect())
    }

    fn aptitude_profile(
        &self,
        character: CharacterId,
    ) -> Result<Option<AptitudeProfile>, Self::Error> {
        Ok(self.fixture.profiles.get(&character.0).cloned())
    }

    fn run_race_ids(
        &self,
        user: UserId,
        character: CharacterId,
    ) -> Result<Vec<RaceId>, Self::Error> {
        Ok(self
            .fixture
            .runs
            .get(&Self::run_key(user, character))
            .cloned()
            .unwrap_or_default())
    }
}
