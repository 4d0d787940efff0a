use std::path::Path;

use ampline_ieee738::{Equilibrium, solve_equilibrium_with};
use ampline_observers::TraceObserver;
use anyhow::Context;
use tracing::info;

use super::load_scenario;

pub fn handle(
    config: Option<&Path>,
    current: Option<f64>,
    tolerance: Option<f64>,
) -> anyhow::Result<()> {
    let file = load_scenario(config)?;
    let equilibrium = solve(&file, current, tolerance)?;

    println!(
        "{:.1} A -> {:.3} °C ({} iterations)",
        equilibrium.current, equilibrium.temperature, equilibrium.iterations
    );
    Ok(())
}

fn solve(
    file: &ampline_ieee738::ScenarioFile,
    current: Option<f64>,
    tolerance: Option<f64>,
) -> anyhow::Result<Equilibrium> {
    let params = file.parameters().context("invalid conductor parameters")?;
    let current = current.unwrap_or(file.scenario.steady_current_a);
    let mut options = file.equilibrium_options();
    if let Some(tolerance) = tolerance {
        options.tolerance = tolerance;
    }

    let equilibrium = solve_equilibrium_with(
        &params,
        current,
        &options,
        TraceObserver::new("equilibrium"),
    )
    .with_context(|| format!("no steady state for {current} A"))?;

    info!(
        current,
        temperature = equilibrium.temperature,
        iterations = equilibrium.iterations,
        "steady state found"
    );
    Ok(equilibrium)
}
