//! Letter-grade aptitude model.
use serde::{Deserialize, Serialize};

use crate::race::{DistanceCategory, Surface};

/// Aptitude letter grade on the S..G scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Default for Grade {
    fn default() -> Self {
        Self::D
    }
}

impl Grade {
    /// Numeric scale used throughout the planner (S=4 .. G=-3).
    #[must_use]
    pub const fn score(self) -> i32 {
        match self {
            Self::S => 4,
            Self::A => 3,
            Self::B => 2,
            Self::C => 1,
            Self::D => 0,
            Self::E => -1,
            Self::F => -2,
            Self::G => -3,
        }
    }

    /// Parse a grade letter. Unrecognized input falls back to D (0).
    #[must_use]
    pub fn from_letter(letter: &str) -> Self {
        Self::try_from_letter(letter).unwrap_or_default()
    }

    /// Parse a grade letter, returning `None` for unrecognized input.
    #[must_use]
    pub fn try_from_letter(letter: &str) -> Option<Self> {
        match letter.trim() {
            "S" => Some(Self::S),
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "E" => Some(Self::E),
            "F" => Some(Self::F),
            "G" => Some(Self::G),
            _ => None,
        }
    }

    #[must_use]
    pub const fn letter(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.letter())
    }
}

/// Per-character aptitude grades.
///
/// Running-style grades are carried for completeness; the calendar planner
/// only consumes the surface and distance axes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AptitudeProfile {
    #[serde(default)]
    pub turf: Grade,
    #[serde(default)]
    pub dirt: Grade,
    #[serde(default)]
    pub sprint: Grade,
    #[serde(default)]
    pub mile: Grade,
    #[serde(default)]
    pub middle: Grade,
    #[serde(default)]
    pub long: Grade,
    #[serde(default)]
    pub front_runner: Grade,
    #[serde(default)]
    pub early_foot: Grade,
    #[serde(default)]
    pub midfield: Grade,
    #[serde(default)]
    pub closer: Grade,
}

impl AptitudeProfile {
    /// Numeric aptitude for a surface.
    #[must_use]
    pub const fn surface_score(&self, surface: Surface) -> i32 {
        match surface {
            Surface::Turf => self.turf.score(),
            Surface::Dirt => self.dirt.score(),
        }
    }

    /// Numeric aptitude for a distance bucket.
    #[must_use]
    pub const fn distance_score(&self, distance: DistanceCategory) -> i32 {
        match distance {
            DistanceCategory::Sprint => self.sprint.score(),
            DistanceCategory::Mile => self.mile.score(),
            DistanceCategory::Middle => self.middle.score(),
            DistanceCategory::Long => self.long.score(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_scale_matches_letters() {
        assert_eq!(Grade::S.score(), 4);
        assert_eq!(Grade::C.score(), 1);
        assert_eq!(Grade::D.score(), 0);
        assert_eq!(Grade::G.score(), -3);
    }

    #[test]
    fn unknown_letters_default_to_d() {
        assert_eq!(Grade::from_letter("Z"), Grade::D);
        assert_eq!(Grade::from_letter(""), Grade::D);
        assert_eq!(Grade::from_letter(" A "), Grade::A);
        assert!(Grade::try_from_letter("?").is_none());
    }

    #[test]
    fn profile_scores_select_the_right_axis() {
        let profile = AptitudeProfile {
            turf: Grade::A,
            dirt: Grade::G,
            sprint: Grade::B,
            long: Grade::E,
            ..AptitudeProfile::default()
        };
        assert_eq!(profile.surface_score(Surface::Turf), 3);
        assert_eq!(profile.surface_score(Surface::Dirt), -3);
        assert_eq!(profile.distance_score(DistanceCategory::Sprint), 2);
        assert_eq!(profile.distance_score(DistanceCategory::Mile), 0);
        assert_eq!(profile.distance_score(DistanceCategory::Long), -1);
    }
}
