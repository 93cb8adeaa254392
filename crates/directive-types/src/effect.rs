//! Data-encoded state mutations.
//!
//! Every consequence a choice can have, immediate or deferred, is an
//! [`Effect`] value rather than executable code. The engine interprets
//! these against the world state; this crate only describes them, so the
//! whole event catalog can be serialized, compared, and inspected.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Metric;

/// A single mutation of the world state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Effect {
    /// Add `delta` to a metric.
    Adjust {
        /// Target metric.
        metric: Metric,
        /// Signed change.
        delta: f64,
    },
    /// Multiply a metric by `factor`.
    Scale {
        /// Target metric.
        metric: Metric,
        /// Multiplier.
        factor: f64,
    },
    /// Overwrite a metric with `value`.
    Set {
        /// Target metric.
        metric: Metric,
        /// New value.
        value: f64,
    },
    /// Write a sticky narrative flag.
    SetFlag {
        /// Flag name.
        flag: String,
        /// Flag value.
        value: bool,
    },
    /// Enqueue `effect` to fire `days_ahead` days after the current day.
    Schedule {
        /// Delay in days; zero means due at the next resolution step.
        days_ahead: u32,
        /// The deferred effect.
        effect: Box<Effect>,
    },
}

impl Effect {
    /// Shorthand for [`Effect::Adjust`].
    pub const fn adjust(metric: Metric, delta: f64) -> Self {
        Self::Adjust { metric, delta }
    }

    /// Shorthand for [`Effect::Scale`].
    pub const fn scale(metric: Metric, factor: f64) -> Self {
        Self::Scale { metric, factor }
    }

    /// Shorthand for [`Effect::Set`].
    pub const fn set(metric: Metric, value: f64) -> Self {
        Self::Set { metric, value }
    }

    /// Shorthand for setting `flag` to `true`.
    pub fn flag(flag: &str) -> Self {
        Self::SetFlag {
            flag: flag.to_owned(),
            value: true,
        }
    }

    /// Shorthand for [`Effect::Schedule`].
    pub fn after(days_ahead: u32, effect: Self) -> Self {
        Self::Schedule {
            days_ahead,
            effect: Box::new(effect),
        }
    }
}
