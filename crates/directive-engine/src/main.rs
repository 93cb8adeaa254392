//! Command-line driver for the Pandemic Directive simulation.
//!
//! Runs one scripted playthrough from start to ending and prints a
//! status report for every day. Logs go to stderr; the day reports and
//! the final history export go to stdout.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from the path given as the first argument, or
//!    `directive-config.yaml`, or built-in defaults
//! 2. Initialize structured logging (tracing)
//! 3. Create the session and brief day 1
//! 4. Run the playthrough with the configured choice script
//! 5. Print the ending and export the history log as JSON

mod error;
mod report;

use std::path::PathBuf;

use directive_core::config::{DirectiveConfig, LogFormat, LoggingConfig};
use directive_core::decision::ScriptedChoices;
use directive_core::runner::{self, PlaythroughEndReason};
use directive_core::session::Session;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::report::ReportCallback;

/// Default configuration file name, looked up in the working directory.
const DEFAULT_CONFIG_PATH: &str = "directive-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the choice script
/// names an impossible choice, or the history cannot be serialized.
fn main() -> Result<(), EngineError> {
    // 1. Load configuration. Logging is not up yet, so the source is
    //    reported once the subscriber exists.
    let (config, source) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    let config_source = source
        .as_deref()
        .map_or_else(|| "defaults".to_owned(), |p| p.display().to_string());
    info!(
        config = %config_source,
        max_days = config.playthrough.max_days,
        scripted_choices = config.playthrough.choices.len(),
        "Configuration loaded"
    );

    // 3. Create the session and show the opening briefing.
    let mut session = Session::new(&config);
    let briefing = session.start_game();
    println!("PANDEMIC DIRECTIVE: ZERO HOUR");
    println!("{}", report::status_report(&briefing.metrics));
    if let Some(event) = &briefing.event {
        println!("{}", report::event_block(event));
    }

    // 4. Run the playthrough.
    let mut source = ScriptedChoices::new(config.playthrough.choices.clone());
    let result = runner::run_playthrough(
        &mut session,
        &mut source,
        config.playthrough.max_days,
        &mut ReportCallback,
    )?;
    runner::log_playthrough_end(&result);

    // 5. Print the outcome and export history.
    match result.end_reason {
        PlaythroughEndReason::Ending(ending) => {
            println!("FINAL OUTCOME: {}", ending.label());
        }
        PlaythroughEndReason::MaxDaysReached => {
            println!(
                "No ending reached within {} days.",
                config.playthrough.max_days
            );
        }
    }
    println!("{}", serde_json::to_string_pretty(&session.history_data())?);

    Ok(())
}

/// Load the configuration, falling back to defaults when no file exists.
///
/// An explicit path argument must exist; the default path is optional.
fn load_config() -> Result<(DirectiveConfig, Option<PathBuf>), EngineError> {
    if let Some(arg) = std::env::args_os().nth(1) {
        let path = PathBuf::from(arg);
        let config = DirectiveConfig::from_file(&path)?;
        return Ok((config, Some(path)));
    }

    let path = PathBuf::from(DEFAULT_CONFIG_PATH);
    if path.exists() {
        let config = DirectiveConfig::from_file(&path)?;
        Ok((config, Some(path)))
    } else {
        Ok((DirectiveConfig::parse("")?, None))
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
