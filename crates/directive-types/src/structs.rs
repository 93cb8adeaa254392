//! Structured payloads shared between the engine and the presentation layer.
//!
//! Nothing here is pre-rendered text. The presentation layer decides how
//! to format a [`TickResult`] or chart a [`HistoryData`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Ending;

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Append-only log with one entry per completed tick.
///
/// The five sequences are parallel: index `i` of each describes the same
/// tick. They are only ever extended together through [`HistoryData::push`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HistoryData {
    /// Day number of each completed tick.
    pub day: Vec<u32>,
    /// Population after the tick.
    pub population: Vec<f64>,
    /// Infection after the tick.
    pub infection: Vec<f64>,
    /// Economy after the tick.
    pub economy: Vec<f64>,
    /// Cumulative cost after the tick.
    pub cost: Vec<f64>,
}

impl HistoryData {
    /// Append one aligned entry to all five sequences.
    pub fn push(&mut self, day: u32, population: f64, infection: f64, economy: f64, cost: f64) {
        self.day.push(day);
        self.population.push(population);
        self.infection.push(infection);
        self.economy.push(economy);
        self.cost.push(cost);
    }

    /// Number of completed ticks recorded.
    pub fn len(&self) -> usize {
        self.day.len()
    }

    /// Whether no tick has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.day.is_empty()
    }

    /// Whether all five sequences have the same length.
    pub fn is_aligned(&self) -> bool {
        let n = self.day.len();
        self.population.len() == n
            && self.infection.len() == n
            && self.economy.len() == n
            && self.cost.len() == n
    }
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Copy of every numeric field of the world state at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MetricsSnapshot {
    /// Day the snapshot was taken on.
    pub day: u32,
    /// Infection level.
    pub infection: f64,
    /// Mortality rate.
    pub mortality: f64,
    /// Public trust.
    pub trust: f64,
    /// Economic stability.
    pub economy: f64,
    /// Remaining healthcare capacity.
    pub healthcare_capacity: f64,
    /// Civil unrest.
    pub unrest: f64,
    /// Surviving population fraction.
    pub population: f64,
    /// Running expenditure.
    pub cumulative_cost: f64,
}

/// How much natural progression moved each field during one tick.
///
/// All values are the raw, pre-clamp amounts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ProgressionReport {
    /// Population lost to the infection.
    pub population_loss: f64,
    /// Healthcare capacity consumed.
    pub healthcare_loss: f64,
    /// Economy lost to unrest.
    pub economy_loss: f64,
    /// Cost added by caring for the infected.
    pub cost_added: f64,
}

// ---------------------------------------------------------------------------
// Events and choices
// ---------------------------------------------------------------------------

/// The text of a day's event and its choices, as offered to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventPrompt {
    /// Day the event belongs to.
    pub day: u32,
    /// Narrative text.
    pub text: String,
    /// Choice texts, in selection-index order.
    pub choices: Vec<String>,
}

/// The choice the player made on a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AppliedChoice {
    /// Index into the event's choice list.
    pub index: usize,
    /// Choice text.
    pub text: String,
}

// ---------------------------------------------------------------------------
// Tick result
// ---------------------------------------------------------------------------

/// Everything one engine call produced, for the presentation layer.
///
/// A briefing result (returned when a game starts) has
/// `progression_applied == false` and no history entry behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TickResult {
    /// The day this result describes.
    pub day: u32,
    /// Whether a tick actually ran (natural progression applied).
    pub progression_applied: bool,
    /// Natural progression amounts, when a tick ran.
    pub progression: Option<ProgressionReport>,
    /// The day's event, if the catalog defines one.
    pub event: Option<EventPrompt>,
    /// The choice applied to the event, if any.
    pub applied_choice: Option<AppliedChoice>,
    /// Number of delayed effects that fired during the tick.
    pub delayed_effects_fired: usize,
    /// Metrics after clamping.
    pub metrics: MetricsSnapshot,
    /// Whether the population is in critical mode.
    pub critical: bool,
    /// The ending reached on this tick, if any.
    pub ending: Option<Ending>,
    /// The day the next call will resolve.
    pub next_day: u32,
    /// The event awaiting a decision on `next_day`, if any.
    pub next_event: Option<EventPrompt>,
}

impl TickResult {
    /// Whether the player must (or may) decide something on the next day.
    pub const fn awaits_decision(&self) -> bool {
        self.next_event.is_some()
    }
}
