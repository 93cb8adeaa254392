//! Delayed-effect scheduler.
//!
//! Effects are queued with an absolute trigger day and fire exactly once,
//! during the resolution step of the first tick whose day is at or past
//! the trigger. Effects due on the same tick fire in insertion order.
//!
//! Resolution partitions the queue once into due and pending halves
//! before applying anything. An effect that enqueues another effect while
//! being applied appends to the pending half, so it can never fire in the
//! same resolution step, even with a zero-day delay.

use directive_types::Effect;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::effect;
use crate::state::WorldState;

/// An effect waiting for its trigger day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayedEffect {
    /// First day on which the effect fires.
    pub trigger_day: u32,
    /// The mutation to apply.
    pub effect: Effect,
}

/// Queue `effect` to fire `days_ahead` days after the state's current day.
pub fn queue(state: &mut WorldState, days_ahead: u32, effect: Effect) {
    let trigger_day = state.day.saturating_add(days_ahead);
    debug!(day = state.day, trigger_day, "Delayed effect queued");
    state.delayed_effects.push(DelayedEffect {
        trigger_day,
        effect,
    });
}

/// Apply and retire every effect due on or before the current day.
///
/// Returns the number of effects that fired.
pub fn resolve(state: &mut WorldState) -> usize {
    let day = state.day;
    let (due, pending): (Vec<DelayedEffect>, Vec<DelayedEffect>) =
        std::mem::take(&mut state.delayed_effects)
            .into_iter()
            .partition(|e| e.trigger_day <= day);
    state.delayed_effects = pending;

    for delayed in &due {
        effect::apply(state, &delayed.effect);
    }

    if !due.is_empty() {
        debug!(
            day,
            fired = due.len(),
            pending = state.delayed_effects.len(),
            "Delayed effects resolved"
        );
    }
    due.len()
}

#[cfg(test)]
mod tests {
    use directive_types::Metric;

    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn effect_fires_on_its_trigger_day_only() {
        let mut state = WorldState::default();
        queue(&mut state, 3, Effect::adjust(Metric::Unrest, 0.2));

        for day in 1..=3 {
            state.day = day;
            assert_eq!(resolve(&mut state), 0, "fired early on day {day}");
        }
        state.day = 4;
        assert_eq!(resolve(&mut state), 1);
        assert!(approx(state.unrest, 0.3));
        assert!(state.delayed_effects.is_empty());

        state.day = 5;
        assert_eq!(resolve(&mut state), 0);
        assert!(approx(state.unrest, 0.3));
    }

    #[test]
    fn overdue_effect_fires_on_next_resolution() {
        let mut state = WorldState::default();
        queue(&mut state, 2, Effect::adjust(Metric::Trust, -0.1));
        state.day = 10;
        assert_eq!(resolve(&mut state), 1);
        assert!(approx(state.trust, 0.55));
    }

    #[test]
    fn zero_delay_fires_at_same_day_resolution() {
        let mut state = WorldState::default();
        queue(&mut state, 0, Effect::adjust(Metric::Economy, -0.05));
        assert_eq!(resolve(&mut state), 1);
        assert!(approx(state.economy, 0.7));
    }

    #[test]
    fn due_effects_apply_in_insertion_order() {
        let mut state = WorldState::default();
        queue(&mut state, 1, Effect::set(Metric::Infection, 0.5));
        queue(&mut state, 1, Effect::scale(Metric::Infection, 0.5));
        state.day = 2;
        assert_eq!(resolve(&mut state), 2);
        assert!(approx(state.infection, 0.25));
    }

    #[test]
    fn identical_effects_each_fire_once() {
        let mut state = WorldState::default();
        let effect = Effect::adjust(Metric::Mortality, 0.04);
        queue(&mut state, 1, effect.clone());
        queue(&mut state, 1, effect);
        state.day = 2;
        assert_eq!(resolve(&mut state), 2);
        assert!(approx(state.mortality, 0.09));
        assert!(state.delayed_effects.is_empty());
    }

    #[test]
    fn pending_effects_keep_their_order() {
        let mut state = WorldState::default();
        queue(&mut state, 5, Effect::flag("a"));
        queue(&mut state, 1, Effect::flag("b"));
        queue(&mut state, 7, Effect::flag("c"));
        state.day = 2;
        resolve(&mut state);
        let remaining: Vec<u32> = state.delayed_effects.iter().map(|e| e.trigger_day).collect();
        assert_eq!(remaining, vec![6, 8]);
    }

    #[test]
    fn reentrant_enqueue_waits_for_a_later_tick() {
        let mut state = WorldState::default();
        queue(
            &mut state,
            0,
            Effect::after(0, Effect::adjust(Metric::Unrest, 0.1)),
        );
        assert_eq!(resolve(&mut state), 1);
        assert!(approx(state.unrest, 0.1));
        assert_eq!(state.delayed_effects.len(), 1);

        state.day = 2;
        assert_eq!(resolve(&mut state), 1);
        assert!(approx(state.unrest, 0.2));
        assert!(state.delayed_effects.is_empty());
    }
}
