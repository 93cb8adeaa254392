//! Enumeration types for the Pandemic Directive simulation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// A numeric field of the world state that effects can target.
///
/// Seven metrics are bounded to `[0.0, 1.0]` by the once-per-tick clamp.
/// [`Metric::CumulativeCost`] is the running expenditure and is unbounded
/// in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Metric {
    /// Fraction of the population currently infected.
    Infection,
    /// Case fatality rate.
    Mortality,
    /// Public trust in the government.
    Trust,
    /// Economic stability.
    Economy,
    /// Remaining healthcare capacity.
    HealthcareCapacity,
    /// Civil unrest.
    Unrest,
    /// Fraction of the starting population still alive.
    Population,
    /// Running resource expenditure (negative means net gain).
    CumulativeCost,
}

impl Metric {
    /// The seven metrics clamped to `[0.0, 1.0]` after every tick.
    pub const BOUNDED: [Self; 7] = [
        Self::Infection,
        Self::Mortality,
        Self::Trust,
        Self::Economy,
        Self::HealthcareCapacity,
        Self::Unrest,
        Self::Population,
    ];

    /// Whether the clamp step applies to this metric.
    pub const fn is_bounded(self) -> bool {
        !matches!(self, Self::CumulativeCost)
    }

    /// Short display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Infection => "infection",
            Self::Mortality => "mortality",
            Self::Trust => "trust",
            Self::Economy => "economy",
            Self::HealthcareCapacity => "healthcare",
            Self::Unrest => "unrest",
            Self::Population => "population",
            Self::CumulativeCost => "cost",
        }
    }
}

impl core::fmt::Display for Metric {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Endings
// ---------------------------------------------------------------------------

/// A terminal narrative outcome.
///
/// Endings are only evaluated from the configured earliest day onward.
/// The engine surfaces an ending but never halts on it; stopping is the
/// caller's decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Ending {
    /// Infection saturated while healthcare collapsed.
    HumanExtinction,
    /// The virus was beaten but the economy was destroyed doing it.
    CountrySacrificed,
    /// The virus was contained with mortality kept low.
    ControlledEradication,
    /// The virus was contained but public trust never recovered.
    GenerationalTrauma,
}

impl Ending {
    /// Headline label shown when the ending is reached.
    pub const fn label(self) -> &'static str {
        match self {
            Self::HumanExtinction => "HUMAN EXTINCTION",
            Self::CountrySacrificed => "COUNTRY SACRIFICED",
            Self::ControlledEradication => "CONTROLLED ERADICATION",
            Self::GenerationalTrauma => "GENERATIONAL TRAUMA",
        }
    }

    /// Closing narrative text for the ending.
    pub const fn epilogue(self) -> &'static str {
        match self {
            Self::HumanExtinction => {
                "Hospitals became incubation centers. The viral load is too high for species survival."
            }
            Self::CountrySacrificed => {
                "The nation dissolves into warring tribes. Starvation claims those the virus missed."
            }
            Self::ControlledEradication => {
                "We have survived. The cost was high, but humanity endures with its soul intact."
            }
            Self::GenerationalTrauma => {
                "The government falls. The virus is contained, but the survivors will never trust authority again. History will judge you."
            }
        }
    }
}

impl core::fmt::Display for Ending {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cumulative_cost_is_the_only_unbounded_metric() {
        assert!(!Metric::CumulativeCost.is_bounded());
        for metric in Metric::BOUNDED {
            assert!(metric.is_bounded(), "{metric} should be bounded");
        }
    }

    #[test]
    fn metric_serializes_snake_case() {
        let json = serde_json::to_string(&Metric::HealthcareCapacity).ok();
        assert_eq!(json.as_deref(), Some("\"healthcare_capacity\""));
    }

    #[test]
    fn ending_labels_are_distinct() {
        let labels = [
            Ending::HumanExtinction.label(),
            Ending::CountrySacrificed.label(),
            Ending::ControlledEradication.label(),
            Ending::GenerationalTrauma.label(),
        ];
        for (i, a) in labels.iter().enumerate() {
            for b in labels.iter().skip(i.saturating_add(1)) {
                assert_ne!(a, b);
            }
        }
    }
}
