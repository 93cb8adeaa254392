//! World state, delayed effects, event catalog, and day-step engine for
//! the Pandemic Directive simulation.
//!
//! The simulation advances one day per tick. Each tick applies natural
//! progression, resolves the day's decision, fires due delayed effects,
//! clamps the metrics, records history, and checks for an ending.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `directive-config.yaml`.
//! - [`state`] -- The [`WorldState`] aggregate and clamping.
//! - [`effect`] -- Interpretation of data-encoded effects.
//! - [`scheduler`] -- Delayed-effect queue and resolution.
//! - [`catalog`] -- The fixed day-keyed event catalog.
//! - [`progression`] -- Natural per-day decay.
//! - [`ending`] -- Time-gated ending evaluation.
//! - [`tick`] -- The day-step engine.
//! - [`session`] -- Start / choose / history entry surface.
//! - [`decision`] -- [`ChoiceSource`] trait and stock sources.
//! - [`runner`] -- Bounded playthrough loop.
//!
//! [`WorldState`]: state::WorldState
//! [`ChoiceSource`]: decision::ChoiceSource

pub mod catalog;
pub mod config;
pub mod decision;
pub mod effect;
pub mod ending;
pub mod progression;
pub mod runner;
pub mod scheduler;
pub mod session;
pub mod state;
pub mod tick;
