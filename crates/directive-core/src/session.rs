//! Game session: the entry surface a presentation layer calls into.
//!
//! A [`Session`] exclusively owns one [`WorldState`] and the rules it
//! ticks with. There is no process-wide state; independent sessions can
//! coexist freely.
//!
//! The flow a front end follows:
//!
//! 1. [`Session::start_game`] resets the world and returns a briefing
//!    for day 1, including its event. No tick runs.
//! 2. [`Session::make_choice`] resolves the current day with a choice
//!    for its event; [`Session::pass_day`] resolves it without one.
//! 3. [`Session::history_data`] returns the log for charting.
//!
//! The session reports endings but keeps accepting ticks afterwards;
//! whether to stop is the caller's decision.

use directive_types::{Ending, EventPrompt, HistoryData, SessionId, TickResult};
use tracing::{debug, info};

use crate::catalog;
use crate::config::{DirectiveConfig, InitialConditions};
use crate::state::WorldState;
use crate::tick::{self, TickError, TickRules};

/// One playthrough of the game.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    initial: InitialConditions,
    rules: TickRules,
    state: WorldState,
    ending: Option<Ending>,
}

impl Session {
    /// Create a session at day 1 using the given configuration.
    pub fn new(config: &DirectiveConfig) -> Self {
        Self {
            id: SessionId::new(),
            initial: config.initial.clone(),
            rules: TickRules::from_config(config),
            state: WorldState::new(&config.initial),
            ending: None,
        }
    }

    /// The session's identifier.
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Read-only view of the world state.
    pub const fn state(&self) -> &WorldState {
        &self.state
    }

    /// The day the next tick will resolve.
    pub const fn day(&self) -> u32 {
        self.state.day
    }

    /// The most recent ending reported by a tick, if any.
    pub const fn ending(&self) -> Option<Ending> {
        self.ending
    }

    /// Reset to a fresh world and brief the player on day 1.
    pub fn start_game(&mut self) -> TickResult {
        self.state = WorldState::new(&self.initial);
        self.ending = None;
        info!(session_id = %self.id, "Game started");
        tick::briefing(&self.state)
    }

    /// Resolve the current day, applying `index` to the day's event.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::InvalidChoiceIndex`] if the day has no event
    /// or the index is out of range. The session is left unchanged.
    pub fn make_choice(&mut self, index: usize) -> Result<TickResult, TickError> {
        self.advance(Some(index))
    }

    /// Resolve the current day without a decision.
    pub fn pass_day(&mut self) -> TickResult {
        let result = tick::pass_tick(&mut self.state, &self.rules);
        self.note_ending(&result);
        result
    }

    /// Resolve the current day with an optional choice.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::InvalidChoiceIndex`] as for
    /// [`Session::make_choice`].
    pub fn advance(&mut self, choice: Option<usize>) -> Result<TickResult, TickError> {
        let result = tick::run_tick(&mut self.state, &self.rules, choice).map_err(|err| {
            debug!(session_id = %self.id, %err, "Tick rejected");
            err
        })?;
        self.note_ending(&result);
        Ok(result)
    }

    const fn note_ending(&mut self, result: &TickResult) {
        if result.ending.is_some() {
            self.ending = result.ending;
        }
    }

    /// The event awaiting a decision on the current day, if any.
    pub fn pending_event(&self) -> Option<EventPrompt> {
        catalog::event_for_day(self.state.day).map(|e| e.prompt())
    }

    /// Snapshot of the history log.
    pub fn history_data(&self) -> HistoryData {
        self.state.history.clone()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&DirectiveConfig::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn start_game_briefs_day_one_without_ticking() {
        let mut session = Session::default();
        let briefing = session.start_game();
        assert_eq!(briefing.day, 1);
        assert!(!briefing.progression_applied);
        assert_eq!(briefing.event.unwrap().choices.len(), 3);
        assert!(session.history_data().is_empty());
        assert_eq!(session.day(), 1);
    }

    #[test]
    fn start_game_resets_progress() {
        let mut session = Session::default();
        session.start_game();
        session.make_choice(2).unwrap();
        session.pass_day();
        assert_eq!(session.day(), 3);

        session.start_game();
        assert_eq!(session.day(), 1);
        assert!(session.history_data().is_empty());
        assert!(session.state().flags.is_empty());
        assert!(session.state().delayed_effects.is_empty());
    }

    #[test]
    fn make_choice_resolves_current_day() {
        let mut session = Session::default();
        session.start_game();
        let result = session.make_choice(0).unwrap();
        assert_eq!(result.day, 1);
        assert_eq!(session.day(), 2);
        assert!(approx(session.state().trust, 0.70));
        assert_eq!(session.history_data().len(), 1);
    }

    #[test]
    fn pending_event_tracks_current_day() {
        let mut session = Session::default();
        session.start_game();
        assert_eq!(session.pending_event().map(|e| e.day), Some(1));
        session.pass_day();
        assert!(session.pending_event().is_none());
    }

    #[test]
    fn ending_is_remembered() {
        let mut session = Session::default();
        session.start_game();
        for _ in 0..24 {
            let result = session.pass_day();
            assert!(result.ending.is_none());
        }
        let result = session.pass_day();
        assert_eq!(result.day, 25);
        assert_eq!(result.ending, Some(Ending::ControlledEradication));
        assert_eq!(session.ending(), Some(Ending::ControlledEradication));
    }

    #[test]
    fn pass_day_on_event_day_leaves_event_undecided() {
        let mut session = Session::default();
        session.start_game();
        let result = session.pass_day();
        assert!(result.progression_applied);
        assert_eq!(result.day, 1);
        assert!(result.event.is_some());
        assert!(result.applied_choice.is_none());
        assert_eq!(session.day(), 2);
        assert_eq!(session.history_data().len(), 1);
    }

    #[test]
    fn sessions_are_independent() {
        let mut a = Session::default();
        let mut b = Session::default();
        a.start_game();
        b.start_game();
        a.make_choice(2).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(b.day(), 1);
        assert!(b.state().flags.is_empty());
    }
}
