//! Day-step engine: one call resolves one day of the simulation.
//!
//! Each tick runs through these phases, in order:
//!
//! 1. **Validate** -- check the requested choice against the day's event.
//!    A bad index is rejected here, before anything is mutated.
//! 2. **Progression** -- natural decay of population, healthcare, and
//!    economy; cost accrues.
//! 3. **Decision** -- apply the chosen option of the day's event, if a
//!    choice was supplied. Without one the day passes undecided.
//! 4. **Delayed effects** -- fire and retire everything now due.
//! 5. **Clamp** -- normalize bounded metrics into `[0.0, 1.0]`.
//! 6. **Critical mode** -- update the population hysteresis flag.
//! 7. **Record** -- append the day to the history log.
//! 8. **Ending** -- evaluate endings; a match is reported, not enforced.
//! 9. **Advance** -- increment the day.
//!
//! The tick is deterministic: the same state and choice always produce
//! the same next state.

use directive_types::{AppliedChoice, EventPrompt, TickResult};
use tracing::{debug, info, warn};

use crate::catalog::{self, Choice};
use crate::config::{CriticalConfig, DirectiveConfig, ProgressionConfig};
use crate::ending::EndingEvaluator;
use crate::progression;
use crate::scheduler;
use crate::state::WorldState;

/// Flag name holding the critical-mode state.
pub const CRITICAL_MODE_FLAG: &str = "critical_mode";

/// Errors that can occur during tick execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TickError {
    /// The choice index does not exist for the day's event, or the day
    /// has no event at all (`available == 0`).
    #[error("invalid choice index {index} on day {day} ({available} choices available)")]
    InvalidChoiceIndex {
        /// The day the choice was made on.
        day: u32,
        /// The rejected index.
        index: usize,
        /// Number of choices the day offers.
        available: usize,
    },
}

/// The fixed rules a session ticks with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickRules {
    /// Natural progression coefficients.
    pub progression: ProgressionConfig,
    /// Ending predicate.
    pub endings: EndingEvaluator,
    /// Critical-mode thresholds.
    pub critical: CriticalConfig,
}

impl TickRules {
    /// Extract the rules from a full configuration.
    pub const fn from_config(config: &DirectiveConfig) -> Self {
        Self {
            progression: config.progression,
            endings: EndingEvaluator::new(config.endings),
            critical: config.critical,
        }
    }
}

impl Default for TickRules {
    fn default() -> Self {
        Self::from_config(&DirectiveConfig::default())
    }
}

/// Execute one complete tick for the state's current day.
///
/// # Errors
///
/// Returns [`TickError::InvalidChoiceIndex`] if `choice` is out of range
/// for the day's event or the day has no event. The state is untouched
/// in that case.
pub fn run_tick(
    state: &mut WorldState,
    rules: &TickRules,
    choice: Option<usize>,
) -> Result<TickResult, TickError> {
    let event = catalog::event_for_day(state.day);

    // --- Phase 1: Validate ---
    let chosen = select_choice(state.day, event.as_ref(), choice)?;

    Ok(resolve_day(state, rules, event.as_ref(), chosen))
}

/// Execute one tick without a decision.
///
/// Every day can pass undecided, so this path has nothing to reject.
pub fn pass_tick(state: &mut WorldState, rules: &TickRules) -> TickResult {
    let event = catalog::event_for_day(state.day);
    resolve_day(state, rules, event.as_ref(), None)
}

/// Phases 2 through 9, run once the choice is known to be valid.
fn resolve_day(
    state: &mut WorldState,
    rules: &TickRules,
    event: Option<&catalog::Event>,
    chosen: Option<(usize, &Choice)>,
) -> TickResult {
    let day = state.day;

    // --- Phase 2: Progression ---
    let report = progression::apply(state, &rules.progression);
    debug!(
        day,
        population_loss = report.population_loss,
        economy_loss = report.economy_loss,
        cost_added = report.cost_added,
        "Natural progression applied"
    );

    // --- Phase 3: Decision ---
    let applied_choice = chosen.map(|(index, option)| {
        option.apply(state);
        info!(day, index, choice = option.text.as_str(), "Choice applied");
        AppliedChoice {
            index,
            text: option.text.clone(),
        }
    });
    if applied_choice.is_none() && event.is_some() {
        debug!(day, "Event passed without a decision");
    }

    // --- Phase 4: Delayed effects ---
    let fired = scheduler::resolve(state);

    // --- Phase 5: Clamp ---
    state.clamp();

    // --- Phase 6: Critical mode ---
    let critical = update_critical_mode(state, &rules.critical);

    // --- Phase 7: Record ---
    state.record_history();
    let metrics = state.snapshot();

    // --- Phase 8: Ending ---
    let ending = rules.endings.check(state);
    if let Some(ending) = ending {
        info!(day, ending = ending.label(), "Ending reached");
    }

    // --- Phase 9: Advance ---
    state.day = state.day.saturating_add(1);

    info!(
        day,
        population = metrics.population,
        infection = metrics.infection,
        trust = metrics.trust,
        economy = metrics.economy,
        delayed_effects_fired = fired,
        pending_effects = state.delayed_effects.len(),
        "Day resolved"
    );

    TickResult {
        day,
        progression_applied: true,
        progression: Some(report),
        event: event.map(catalog::Event::prompt),
        applied_choice,
        delayed_effects_fired: fired,
        metrics,
        critical,
        ending,
        next_day: state.day,
        next_event: prompt_for(state.day),
    }
}

/// Describe the current day without running a tick.
///
/// Used when a game starts: the player sees the opening metrics and the
/// first event before making any decision.
pub fn briefing(state: &WorldState) -> TickResult {
    let prompt = prompt_for(state.day);
    TickResult {
        day: state.day,
        progression_applied: false,
        progression: None,
        event: prompt.clone(),
        applied_choice: None,
        delayed_effects_fired: 0,
        metrics: state.snapshot(),
        critical: state.flag(CRITICAL_MODE_FLAG),
        ending: None,
        next_day: state.day,
        next_event: prompt,
    }
}

/// Validate a requested choice against the day's event.
fn select_choice(
    day: u32,
    event: Option<&catalog::Event>,
    choice: Option<usize>,
) -> Result<Option<(usize, &Choice)>, TickError> {
    let Some(index) = choice else {
        return Ok(None);
    };
    let available = event.map_or(0, |e| e.choices.len());
    match event.and_then(|e| e.choice(index)) {
        Some(option) => Ok(Some((index, option))),
        None => {
            warn!(day, index, available, "Rejected invalid choice index");
            Err(TickError::InvalidChoiceIndex {
                day,
                index,
                available,
            })
        }
    }
}

/// Update the critical-mode flag with hysteresis and return its value.
///
/// Critical mode turns on below `enter_below` and only turns off again
/// at or above `exit_at`.
fn update_critical_mode(state: &mut WorldState, thresholds: &CriticalConfig) -> bool {
    let was = state.flag(CRITICAL_MODE_FLAG);
    let now = if state.population < thresholds.enter_below {
        true
    } else if state.population >= thresholds.exit_at {
        false
    } else {
        was
    };
    if now != was {
        info!(
            day = state.day,
            population = state.population,
            critical = now,
            "Critical mode changed"
        );
    }
    if now || was {
        state.flags.insert(CRITICAL_MODE_FLAG.to_owned(), now);
    }
    now
}

fn prompt_for(day: u32) -> Option<EventPrompt> {
    catalog::event_for_day(day).map(|e| e.prompt())
}
