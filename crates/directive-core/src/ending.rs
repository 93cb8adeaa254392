//! Ending evaluation.
//!
//! Endings are time gated: nothing is reported before the earliest ending
//! day. From then on the rules below are tested in order and the first
//! match wins.
//!
//! | # | Condition                                      | Ending                   |
//! |---|------------------------------------------------|--------------------------|
//! | 1 | infection > 0.95 and healthcare capacity < 0.1 | `HumanExtinction`        |
//! | 2 | infection < 0.05 and economy < 0.1             | `CountrySacrificed`      |
//! | 3 | infection < 0.05 and mortality < 0.2           | `ControlledEradication`  |
//! | 4 | infection < 0.3 and trust < 0.2                | `GenerationalTrauma`     |

use directive_types::Ending;

use crate::config::EndingConfig;
use crate::state::WorldState;

/// Pure predicate from world state to an optional ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndingEvaluator {
    earliest_day: u32,
}

impl EndingEvaluator {
    /// Create an evaluator from configuration.
    pub const fn new(config: EndingConfig) -> Self {
        Self {
            earliest_day: config.earliest_day,
        }
    }

    /// Return the first matching ending, or `None` if the game continues.
    pub fn check(&self, state: &WorldState) -> Option<Ending> {
        if state.day < self.earliest_day {
            return None;
        }

        let infection = state.infection;
        if infection > 0.95 && state.healthcare_capacity < 0.1 {
            Some(Ending::HumanExtinction)
        } else if infection < 0.05 && state.economy < 0.1 {
            Some(Ending::CountrySacrificed)
        } else if infection < 0.05 && state.mortality < 0.2 {
            Some(Ending::ControlledEradication)
        } else if infection < 0.3 && state.trust < 0.2 {
            Some(Ending::GenerationalTrauma)
        } else {
            None
        }
    }
}

impl Default for EndingEvaluator {
    fn default() -> Self {
        Self::new(EndingConfig::default())
    }
}

/// Evaluate with the reference earliest day (25).
pub fn check(state: &WorldState) -> Option<Ending> {
    EndingEvaluator::default().check(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_on(day: u32) -> WorldState {
        WorldState {
            day,
            ..WorldState::default()
        }
    }

    #[test]
    fn no_ending_before_day_25_even_when_conditions_hold() {
        for day in 1..25 {
            let mut state = state_on(day);
            state.infection = 0.99;
            state.healthcare_capacity = 0.0;
            assert_eq!(check(&state), None, "day {day}");
            state.infection = 0.0;
            assert_eq!(check(&state), None, "day {day}");
        }
    }

    #[test]
    fn extinction_requires_saturated_infection_and_no_healthcare() {
        let mut state = state_on(25);
        state.infection = 0.96;
        state.healthcare_capacity = 0.05;
        assert_eq!(check(&state), Some(Ending::HumanExtinction));
        state.healthcare_capacity = 0.2;
        assert_eq!(check(&state), None);
    }

    #[test]
    fn collapsed_economy_outranks_containment() {
        let mut state = state_on(30);
        state.infection = 0.01;
        state.economy = 0.05;
        state.mortality = 0.01;
        assert_eq!(check(&state), Some(Ending::CountrySacrificed));
    }

    #[test]
    fn containment_with_low_mortality() {
        let state = state_on(25);
        assert_eq!(check(&state), Some(Ending::ControlledEradication));
    }

    #[test]
    fn containment_with_high_mortality_falls_through_to_trust() {
        let mut state = state_on(25);
        state.mortality = 0.3;
        assert_eq!(check(&state), None);
        state.trust = 0.1;
        assert_eq!(check(&state), Some(Ending::GenerationalTrauma));
    }

    #[test]
    fn generational_trauma_with_moderate_infection() {
        let mut state = state_on(26);
        state.infection = 0.2;
        state.trust = 0.15;
        assert_eq!(check(&state), Some(Ending::GenerationalTrauma));
    }

    #[test]
    fn mid_level_infection_has_no_ending() {
        let mut state = state_on(40);
        state.infection = 0.5;
        state.trust = 0.0;
        assert_eq!(check(&state), None);
    }

    #[test]
    fn earliest_day_is_configurable() {
        let evaluator = EndingEvaluator::new(EndingConfig { earliest_day: 3 });
        assert_eq!(evaluator.check(&state_on(2)), None);
        assert_eq!(
            evaluator.check(&state_on(3)),
            Some(Ending::ControlledEradication)
        );
    }
}
