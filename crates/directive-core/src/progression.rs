//! Natural progression applied at the start of every tick.
//!
//! Population dies off in proportion to infection and mortality, the
//! infected wear down healthcare capacity and add to the running cost,
//! and unrest drags on the economy. Results are not clamped here.

use directive_types::ProgressionReport;

use crate::config::ProgressionConfig;
use crate::state::WorldState;

/// Apply one day of natural progression and report the amounts moved.
pub fn apply(state: &mut WorldState, config: &ProgressionConfig) -> ProgressionReport {
    let report = ProgressionReport {
        population_loss: state.infection * state.mortality * config.death_factor,
        healthcare_loss: state.infection * config.healthcare_strain,
        economy_loss: state.unrest * config.unrest_drag,
        cost_added: state.infection * config.cost_per_infection,
    };

    state.population -= report.population_loss;
    state.healthcare_capacity -= report.healthcare_loss;
    state.economy -= report.economy_loss;
    state.cumulative_cost += report.cost_added;

    report
}
