//! Choice sources for unattended playthroughs.
//!
//! An interactive front end calls [`Session`](crate::session::Session)
//! directly with the player's input. The [`ChoiceSource`] trait covers
//! everything else that needs to pick choices: scripted replays, the
//! engine binary, and tests.

use std::collections::BTreeMap;

use directive_types::EventPrompt;

/// A source of decisions for event days.
pub trait ChoiceSource {
    /// Pick a choice index for the event offered on `day`, or `None` to
    /// let the day pass without a decision.
    fn choose(&mut self, day: u32, event: &EventPrompt) -> Option<usize>;
}

/// A source that never decides; every event passes undecided.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbstainingSource;

impl AbstainingSource {
    /// Create a new abstaining source.
    pub const fn new() -> Self {
        Self
    }
}

impl ChoiceSource for AbstainingSource {
    fn choose(&mut self, _day: u32, _event: &EventPrompt) -> Option<usize> {
        None
    }
}

/// Replays a fixed day-to-index script.
///
/// Days missing from the script pass without a decision. Indices are
/// handed to the engine as-is, so a bad script surfaces as an invalid
/// choice error rather than being silently corrected.
#[derive(Debug, Clone, Default)]
pub struct ScriptedChoices {
    script: BTreeMap<u32, usize>,
}

impl ScriptedChoices {
    /// Create a source from a day-to-index map.
    pub const fn new(script: BTreeMap<u32, usize>) -> Self {
        Self { script }
    }

    /// Create a source from `(day, index)` pairs.
    pub fn from_pairs(pairs: &[(u32, usize)]) -> Self {
        Self::new(pairs.iter().copied().collect())
    }
}

impl ChoiceSource for ScriptedChoices {
    fn choose(&mut self, day: u32, _event: &EventPrompt) -> Option<usize> {
        self.script.get(&day).copied()
    }
}
