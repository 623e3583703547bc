//! Race catalog entries and story-mandated scenario bindings.
use serde::{Deserialize, Serialize};

/// Unique identifier of a catalog race.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct RaceId(pub u32);

impl std::fmt::Display for RaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Track surface of a race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Turf,
    Dirt,
}

impl Surface {
    /// Canonical enumeration order used for deterministic tie-breaks.
    pub const ALL: [Self; 2] = [Self::Turf, Self::Dirt];

    /// Stable numeric id used as the final sort key in slot selection.
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Turf => 0,
            Self::Dirt => 1,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Turf => "Turf",
            Self::Dirt => "Dirt",
        }
    }
}

/// Distance bucket of a race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceCategory {
    Sprint,
    Mile,
    Middle,
    Long,
}

impl DistanceCategory {
    /// Canonical enumeration order used for deterministic tie-breaks.
    pub const ALL: [Self; 4] = [Self::Sprint, Self::Mile, Self::Middle, Self::Long];

    /// Stable numeric id used as the final sort key in slot selection.
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Sprint => 1,
            Self::Mile => 2,
            Self::Middle => 3,
            Self::Long => 4,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sprint => "Sprint",
            Self::Mile => "Mile",
            Self::Middle => "Middle",
            Self::Long => "Long",
        }
    }
}

/// Grade rank of a race. Only G1-G3 take part in calendar allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceRank {
    G1,
    G2,
    G3,
    PreOpen,
    Open,
}

impl RaceRank {
    /// Whether the rank participates in allocation (G1-G3).
    #[must_use]
    pub const fn is_graded(self) -> bool {
        matches!(self, Self::G1 | Self::G2 | Self::G3)
    }

    /// Ascending order key (G1 sorts before G2 before G3).
    #[must_use]
    pub const fn order(self) -> u8 {
        match self {
            Self::G1 => 1,
            Self::G2 => 2,
            Self::G3 => 3,
            Self::PreOpen => 4,
            Self::Open => 5,
        }
    }
}

/// Half-month timing within a calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Half {
    First,
    Second,
}

impl Half {
    pub const ALL: [Self; 2] = [Self::First, Self::Second];
}

/// Career stage a race or calendar slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Junior,
    Classic,
    Senior,
}

impl Stage {
    pub const ALL: [Self; 3] = [Self::Junior, Self::Classic, Self::Senior];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Junior => "Junior",
            Self::Classic => "Classic",
            Self::Senior => "Senior",
        }
    }
}

/// Immutable catalog entry for one race.
///
/// The stage eligibility flags are not mutually exclusive: a race may be
/// runnable in Classic and Senior years at the same timing slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    pub id: RaceId,
    pub name: String,
    pub surface: Surface,
    pub distance: DistanceCategory,
    /// Calendar month, 1-12.
    pub month: u8,
    pub half: Half,
    pub rank: RaceRank,
    #[serde(default)]
    pub junior: bool,
    #[serde(default)]
    pub classic: bool,
    #[serde(default)]
    pub senior: bool,
    /// Marks races that only appear on the overseas story branch.
    #[serde(default)]
    pub branch_only: bool,
}

impl Race {
    /// Whether the race may be run during the given stage.
    #[must_use]
    pub const fn eligible_for(&self, stage: Stage) -> bool {
        match stage {
            Stage::Junior => self.junior,
            Stage::Classic => self.classic,
            Stage::Senior => self.senior,
        }
    }

    /// Number of stages the race is eligible in.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        Stage::ALL
            .iter()
            .filter(|stage| self.eligible_for(**stage))
            .count()
    }

    /// Whether the race occupies the given timing slot.
    #[must_use]
    pub const fn at(&self, month: u8, half: Half) -> bool {
        self.month == month && matches!((self.half, half), (Half::First, Half::First) | (Half::Second, Half::Second))
    }
}

/// Stage override carried by a scenario binding. Bindings are never junior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioStage {
    Classic,
    Senior,
}

/// Story-mandated race binding for a specific character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRace {
    pub race_id: RaceId,
    /// Position of the race within the story sequence.
    pub sequence: u32,
    /// Identifies bindings the story picks one of at random.
    #[serde(default)]
    pub random_group: Option<u32>,
    /// Takes precedence over the race's own stage flags when classifying.
    #[serde(default)]
    pub stage_override: Option<ScenarioStage>,
}
