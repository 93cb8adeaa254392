//! The fixed event catalog.
//!
//! Events are keyed by day number. Each event offers an ordered list of
//! choices, and each choice is a list of [`Effect`]s applied in order when
//! the player selects it. Lookup is pure: calling [`event_for_day`] twice
//! for the same day yields equal events.

use directive_types::{Effect, EventPrompt, Metric};

use crate::effect;
use crate::state::WorldState;

/// Days on which the catalog defines an event, ascending.
pub const EVENT_DAYS: [u32; 4] = [1, 5, 12, 20];

/// A day-specific narrative prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Day the event occurs on.
    pub day: u32,
    /// Narrative text.
    pub text: String,
    /// Selectable choices, never empty.
    pub choices: Vec<Choice>,
}

impl Event {
    /// Look up a choice by selection index.
    pub fn choice(&self, index: usize) -> Option<&Choice> {
        self.choices.get(index)
    }

    /// The presentation view of this event.
    pub fn prompt(&self) -> EventPrompt {
        EventPrompt {
            day: self.day,
            text: self.text.clone(),
            choices: self.choices.iter().map(|c| c.text.clone()).collect(),
        }
    }
}

/// One selectable option of an [`Event`].
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    /// Choice text.
    pub text: String,
    /// Effects applied, in order, when the choice is taken.
    pub effects: Vec<Effect>,
}

impl Choice {
    fn new(text: &str, effects: Vec<Effect>) -> Self {
        Self {
            text: text.to_owned(),
            effects,
        }
    }

    /// Apply the choice's effects to `state`.
    pub fn apply(&self, state: &mut WorldState) {
        effect::apply_all(state, &self.effects);
    }
}

/// Return the event scheduled for `day`, if any.
pub fn event_for_day(day: u32) -> Option<Event> {
    match day {
        1 => Some(disclosure_event()),
        5 => Some(patent_event()),
        12 => Some(protest_event()),
        20 => Some(regional_lockdown_event()),
        _ => None,
    }
}

fn disclosure_event() -> Event {
    Event {
        day: 1,
        text: "Initial reports indicate a novel respiratory pathogen.\n\
               Fatality data is uncertain.\n\n\
               Authorize public disclosure?"
            .to_owned(),
        choices: vec![
            Choice::new(
                "Release preliminary data",
                vec![
                    Effect::adjust(Metric::Trust, 0.05),
                    Effect::adjust(Metric::Infection, 0.01),
                ],
            ),
            Choice::new(
                "Delay announcement",
                vec![
                    Effect::adjust(Metric::Trust, 0.02),
                    Effect::after(5, Effect::scale(Metric::Infection, 1.8)),
                ],
            ),
            Choice::new(
                "Suppress information",
                vec![
                    Effect::adjust(Metric::Trust, -0.1),
                    Effect::flag("censored_media"),
                    Effect::after(7, Effect::adjust(Metric::Unrest, 0.25)),
                ],
            ),
        ],
    }
}

fn patent_event() -> Event {
    Event {
        day: 5,
        text: "Pharmaceutical firms offer rapid vaccine deployment\n\
               in exchange for exclusive global patents."
            .to_owned(),
        choices: vec![
            Choice::new(
                "Fund emergency vaccine trials",
                vec![
                    Effect::adjust(Metric::CumulativeCost, 300.0),
                    Effect::adjust(Metric::Mortality, -0.01),
                    Effect::after(10, Effect::adjust(Metric::Trust, -0.25)),
                ],
            ),
            Choice::new(
                "Sell patents to stabilize economy",
                vec![
                    Effect::adjust(Metric::CumulativeCost, -200.0),
                    Effect::flag("sold_patents"),
                    Effect::after(8, Effect::adjust(Metric::Mortality, 0.04)),
                ],
            ),
        ],
    }
}

fn protest_event() -> Event {
    Event {
        day: 12,
        text: "Mass protests block hospital access.\n\
               Security forces demand authorization."
            .to_owned(),
        choices: vec![
            Choice::new(
                "Deploy military quarantine",
                vec![
                    Effect::adjust(Metric::Unrest, -0.1),
                    Effect::flag("weaponized_quarantine"),
                    Effect::after(6, Effect::adjust(Metric::Trust, -0.3)),
                ],
            ),
            Choice::new(
                "Negotiate with protest leaders",
                vec![
                    Effect::adjust(Metric::Trust, 0.05),
                    Effect::adjust(Metric::Economy, -0.1),
                    Effect::after(4, Effect::adjust(Metric::Unrest, 0.2)),
                ],
            ),
        ],
    }
}

fn regional_lockdown_event() -> Event {
    Event {
        day: 20,
        text: "Sealing one major region could halt transmission.\n\
               Evacuation is impossible."
            .to_owned(),
        choices: vec![
            Choice::new(
                "Authorize total regional lockdown",
                vec![
                    Effect::adjust(Metric::Infection, -0.2),
                    Effect::adjust(Metric::Population, -0.15),
                    Effect::adjust(Metric::Trust, -0.4),
                    Effect::flag("sacrificed_region"),
                ],
            ),
            Choice::new(
                "Refuse and preserve unity",
                vec![
                    Effect::adjust(Metric::Infection, 0.15),
                    Effect::after(5, Effect::adjust(Metric::HealthcareCapacity, -0.3)),
                ],
            ),
        ],
    }
}
