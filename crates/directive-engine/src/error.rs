//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup and the playthrough.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: directive_core::config::ConfigError,
    },

    /// The playthrough failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: directive_core::runner::RunnerError,
    },

    /// Exporting the history log failed.
    #[error("history export error: {source}")]
    Export {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}
