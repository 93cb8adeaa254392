//! Bounded playthrough loop.
//!
//! [`run_playthrough`] drives a [`Session`] day by day, asking a
//! [`ChoiceSource`] for a decision whenever the current day has an event,
//! until an ending is reached or the day limit runs out. The engine
//! itself never stops on an ending; this loop is the caller that does.

use directive_types::{Ending, TickResult};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::decision::ChoiceSource;
use crate::session::Session;
use crate::tick::TickError;

/// Errors that can occur during a playthrough.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick was rejected.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}

/// Reason a playthrough stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaythroughEndReason {
    /// An ending was reached.
    Ending(Ending),
    /// The configured day limit ran out first.
    MaxDaysReached,
}

/// Result of a playthrough.
#[derive(Debug, Clone)]
pub struct PlaythroughResult {
    /// Why the playthrough stopped.
    pub end_reason: PlaythroughEndReason,
    /// The last tick's result, if any tick ran.
    pub final_result: Option<TickResult>,
    /// Number of ticks executed.
    pub total_days: u32,
}

/// Callback invoked after each tick completes.
pub trait TickCallback {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, result: &TickResult, session: &Session);
}

/// A no-op tick callback.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _result: &TickResult, _session: &Session) {}
}

/// Run the session until an ending or `max_days` ticks.
///
/// Starts from the session's current day; call
/// [`Session::start_game`] first for a fresh game.
///
/// # Errors
///
/// Returns [`RunnerError::Tick`] if the choice source picks an invalid
/// index. Ticks completed before the error remain applied.
pub fn run_playthrough(
    session: &mut Session,
    source: &mut dyn ChoiceSource,
    max_days: u32,
    callback: &mut dyn TickCallback,
) -> Result<PlaythroughResult, RunnerError> {
    let mut final_result: Option<TickResult> = None;
    let mut total_days: u32 = 0;

    info!(
        session_id = %session.id(),
        start_day = session.day(),
        max_days,
        "Playthrough starting"
    );

    while total_days < max_days {
        let choice = session
            .pending_event()
            .and_then(|event| source.choose(event.day, &event));

        let result = session.advance(choice)?;
        total_days = total_days.saturating_add(1);
        callback.on_tick(&result, session);

        if let Some(ending) = result.ending {
            return Ok(PlaythroughResult {
                end_reason: PlaythroughEndReason::Ending(ending),
                final_result: Some(result),
                total_days,
            });
        }
        final_result = Some(result);
    }

    info!(max_days, "Day limit reached without an ending");
    Ok(PlaythroughResult {
        end_reason: PlaythroughEndReason::MaxDaysReached,
        final_result,
        total_days,
    })
}

/// Log the outcome of a playthrough.
pub fn log_playthrough_end(result: &PlaythroughResult) {
    info!(
        reason = ?result.end_reason,
        total_days = result.total_days,
        final_day = result.final_result.as_ref().map(|r| r.day),
        final_population = result.final_result.as_ref().map(|r| r.metrics.population),
        "Playthrough ended"
    );
}
