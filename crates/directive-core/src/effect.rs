//! Interpretation of [`Effect`] values against the world state.
//!
//! This is the only place effects turn into mutations. A choice applies
//! its effect list front to back through [`apply_all`]; the scheduler
//! applies each due delayed effect through [`apply`].

use directive_types::Effect;
use tracing::trace;

use crate::scheduler;
use crate::state::WorldState;

/// Apply one effect to `state`.
///
/// Metric writes are unclamped; normalization happens once per tick.
/// [`Effect::Schedule`] enqueues relative to the state's current day.
pub fn apply(state: &mut WorldState, effect: &Effect) {
    match effect {
        Effect::Adjust { metric, delta } => {
            *state.metric_mut(*metric) += delta;
            trace!(day = state.day, %metric, delta, "Metric adjusted");
        }
        Effect::Scale { metric, factor } => {
            *state.metric_mut(*metric) *= factor;
            trace!(day = state.day, %metric, factor, "Metric scaled");
        }
        Effect::Set { metric, value } => {
            *state.metric_mut(*metric) = *value;
            trace!(day = state.day, %metric, value, "Metric set");
        }
        Effect::SetFlag { flag, value } => {
            state.flags.insert(flag.clone(), *value);
            trace!(day = state.day, flag = flag.as_str(), value, "Flag set");
        }
        Effect::Schedule { days_ahead, effect } => {
            scheduler::queue(state, *days_ahead, (**effect).clone());
        }
    }
}

/// Apply a sequence of effects in order.
pub fn apply_all(state: &mut WorldState, effects: &[Effect]) {
    for effect in effects {
        apply(state, effect);
    }
}
