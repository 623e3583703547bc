//! Invocation-scoped registry of consumed race ids.
use std::collections::HashSet;

use crate::race::RaceId;

/// Tracks which races have been placed (or pre-reserved) across every plan
/// of one planning invocation. A race id is consumed at most once.
#[derive(Debug, Clone, Default)]
pub struct UsedRaceRegistry {
    used: HashSet<RaceId>,
}

impl UsedRaceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an id as consumed without caring whether it was already.
    pub fn reserve(&mut self, id: RaceId) {
        self.used.insert(id);
    }

    /// Consume an id; returns false when it was already taken.
    pub fn claim(&mut self, id: RaceId) -> bool {
        self.used.insert(id)
    }

    #[must_use]
    pub fn contains(&self, id: RaceId) -> bool {
        self.used.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.used.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
