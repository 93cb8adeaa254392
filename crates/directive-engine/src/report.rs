//! Plain-text rendering of tick results.
//!
//! The engine hands back structured [`TickResult`] values; turning them
//! into something a person reads happens here and nowhere else.

use directive_core::runner::TickCallback;
use directive_core::session::Session;
use directive_types::{EventPrompt, MetricsSnapshot, TickResult};

const RULE_WIDTH: usize = 50;

/// Render the status block for one set of metrics.
pub fn status_report(metrics: &MetricsSnapshot) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    format!(
        "STATUS REPORT - DAY {day}\n\
         {rule}\n\
         POPULATION: {population}\n\
         ECONOMY:    {economy}\n\
         TRUST:      {trust}\n\
         INFECTION:  {infection}\n\
         MORTALITY:  {mortality}\n\
         HOSPITALS:  {hospitals} capacity\n\
         UNREST:     {unrest}\n\
         COST:       {cost:.1}\n\
         {rule}",
        day = metrics.day,
        population = percent(metrics.population),
        economy = percent(metrics.economy),
        trust = percent(metrics.trust),
        infection = percent(metrics.infection),
        mortality = percent(metrics.mortality),
        hospitals = percent(metrics.healthcare_capacity),
        unrest = percent(metrics.unrest),
        cost = metrics.cumulative_cost,
    )
}

/// Render an event and its numbered choices.
pub fn event_block(event: &EventPrompt) -> String {
    let choices: String = event
        .choices
        .iter()
        .zip(1_usize..)
        .map(|(choice, number)| format!("{number}) {choice}\n"))
        .collect();
    format!("{}\n\n{choices}", event.text)
}

/// Render everything that happened during one tick.
pub fn day_summary(result: &TickResult) -> String {
    let mut lines = vec!["\u{2500}".repeat(RULE_WIDTH), format!("DAY {}", result.day)];

    match &result.event {
        Some(event) => lines.push(event_block(event)),
        None => lines.push("No major decisions today.".to_owned()),
    }
    if let Some(choice) = &result.applied_choice {
        lines.push(format!(">> ACTION: {}", choice.text));
    }
    if result.delayed_effects_fired > 0 {
        lines.push(format!(
            ">> {} earlier decision(s) came due.",
            result.delayed_effects_fired
        ));
    }
    if result.critical {
        lines.push("!! CRITICAL: population below safe levels".to_owned());
    }
    lines.push(status_report(&result.metrics));

    if let Some(ending) = result.ending {
        let rule = "=".repeat(RULE_WIDTH);
        lines.push(rule.clone());
        lines.push(format!("ENDING REACHED: {}", ending.label()));
        lines.push(ending.epilogue().to_owned());
        lines.push(rule);
    }
    lines.join("\n")
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Prints a day summary to stdout after every tick.
pub struct ReportCallback;

impl TickCallback for ReportCallback {
    fn on_tick(&mut self, result: &TickResult, _session: &Session) {
        println!("{}", day_summary(result));
    }
}
