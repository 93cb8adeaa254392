//! Shared type definitions for the Pandemic Directive simulation.
//!
//! This crate holds the data every other crate agrees on: the metric
//! names, effect payloads, ending labels, and the structured per-day
//! result the presentation layer formats. Result types flow to
//! `TypeScript` via `ts-rs` for the charting front end.
//!
//! # Modules
//!
//! - [`ids`] -- Session identifier
//! - [`enums`] -- Metrics and endings
//! - [`effect`] -- Data-encoded state mutations
//! - [`structs`] -- History log, event prompts, and tick results

pub mod effect;
pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use effect::Effect;
pub use enums::{Ending, Metric};
pub use ids::SessionId;
pub use structs::{
    AppliedChoice, EventPrompt, HistoryData, MetricsSnapshot, ProgressionReport, TickResult,
};
