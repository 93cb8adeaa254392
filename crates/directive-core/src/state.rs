//! The world state: one mutable metric vector per game session.
//!
//! [`WorldState`] is a plain aggregate with public fields. Any engine
//! component may read or write any field; the only behavior the state
//! owns is normalization ([`WorldState::clamp`]) and bookkeeping helpers
//! for metrics addressed by [`Metric`].

use std::collections::BTreeMap;

use directive_types::{HistoryData, Metric, MetricsSnapshot};
use serde::{Deserialize, Serialize};

use crate::config::InitialConditions;
use crate::scheduler::DelayedEffect;

/// The simulation's complete mutable state for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    /// Current day, starting at 1. Advances by exactly one per tick.
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
    /// Fraction of the starting population alive.
    pub population: f64,
    /// Running expenditure; unbounded.
    pub cumulative_cost: f64,

    /// Sticky narrative markers set by choices.
    pub flags: BTreeMap<String, bool>,
    /// Pending effects in insertion order.
    pub delayed_effects: Vec<DelayedEffect>,
    /// One entry per completed tick.
    pub history: HistoryData,
}

impl WorldState {
    /// Create a state at day 1 from the given starting values.
    pub fn new(initial: &InitialConditions) -> Self {
        Self {
            day: 1,
            infection: initial.infection,
            mortality: initial.mortality,
            trust: initial.trust,
            economy: initial.economy,
            healthcare_capacity: initial.healthcare_capacity,
            unrest: initial.unrest,
            population: 1.0,
            cumulative_cost: 0.0,
            flags: BTreeMap::new(),
            delayed_effects: Vec::new(),
            history: HistoryData::default(),
        }
    }

    /// Clamp every bounded metric into `[0.0, 1.0]`. Idempotent.
    pub fn clamp(&mut self) {
        for metric in Metric::BOUNDED {
            let slot = self.metric_mut(metric);
            *slot = slot.clamp(0.0, 1.0);
        }
    }

    /// Read a metric.
    pub const fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Infection => self.infection,
            Metric::Mortality => self.mortality,
            Metric::Trust => self.trust,
            Metric::Economy => self.economy,
            Metric::HealthcareCapacity => self.healthcare_capacity,
            Metric::Unrest => self.unrest,
            Metric::Population => self.population,
            Metric::CumulativeCost => self.cumulative_cost,
        }
    }

    /// Mutable access to a metric.
    pub const fn metric_mut(&mut self, metric: Metric) -> &mut f64 {
        match metric {
            Metric::Infection => &mut self.infection,
            Metric::Mortality => &mut self.mortality,
            Metric::Trust => &mut self.trust,
            Metric::Economy => &mut self.economy,
            Metric::HealthcareCapacity => &mut self.healthcare_capacity,
            Metric::Unrest => &mut self.unrest,
            Metric::Population => &mut self.population,
            Metric::CumulativeCost => &mut self.cumulative_cost,
        }
    }

    /// Whether a narrative flag is set to `true`.
    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Append the current day's values to the history log.
    pub fn record_history(&mut self) {
        self.history.push(
            self.day,
            self.population,
            self.infection,
            self.economy,
            self.cumulative_cost,
        );
    }

    /// Copy every numeric field.
    pub const fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            day: self.day,
            infection: self.infection,
            mortality: self.mortality,
            trust: self.trust,
            economy: self.economy,
            healthcare_capacity: self.healthcare_capacity,
            unrest: self.unrest,
            population: self.population,
            cumulative_cost: self.cumulative_cost,
        }
    }

    /// Whether every bounded metric lies in `[0.0, 1.0]`.
    pub fn is_normalized(&self) -> bool {
        Metric::BOUNDED
            .iter()
            .all(|&m| (0.0..=1.0).contains(&self.metric(m)))
    }
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new(&InitialConditions::default())
    }
}
