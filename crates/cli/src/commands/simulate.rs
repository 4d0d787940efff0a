use std::{io::Write, path::Path};

use ampline_ieee738::{MeltOutcome, Simulation, SimulationRun, Trajectory};
use ampline_observers::TraceObserver;
use anyhow::Context;
use tracing::{info, warn};

use super::load_scenario;

/// Simulated seconds between transient trace lines.
const TRACE_INTERVAL_S: usize = 60;

pub fn handle(config: Option<&Path>, csv: Option<&Path>, plot: bool) -> anyhow::Result<()> {
    let file = load_scenario(config)?;
    let simulation = Simulation::from_file(&file).context("invalid scenario")?;
    info!(
        steps = simulation.scheme().steps(),
        time_step = simulation.scheme().time_step(),
        "running reclosure scenario"
    );

    let run = if plot {
        run_with_plot(&simulation)?
    } else {
        simulation
            .run_observed(
                TraceObserver::new("equilibrium"),
                transient_trace(&simulation),
            )
            .context("simulation failed")?
    };

    log_outcome(&run);
    println!("{}", run.report);

    if let Some(path) = csv {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        write_csv(&run.trajectory, file)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), rows = run.trajectory.len(), "wrote trajectory");
    }
    Ok(())
}

fn transient_trace(simulation: &Simulation) -> TraceObserver {
    TraceObserver::new("transient").every(simulation.scheme().samples_per_second * TRACE_INTERVAL_S)
}

fn log_outcome(run: &SimulationRun) {
    match run.trajectory.melt {
        MeltOutcome::NotReached => info!(
            peak = run.report.peak.1,
            "conductor stayed below its melting point"
        ),
        MeltOutcome::Reached { time, step } => warn!(time, step, "conductor reached its melting point"),
    }
}

/// Writes one row per sample with a `time_s,temperature_c,current_a` header.
fn write_csv<W: Write>(trajectory: &Trajectory, writer: W) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["time_s", "temperature_c", "current_a"])?;
    for ((time, temperature), current) in trajectory
        .times
        .iter()
        .zip(&trajectory.temperatures)
        .zip(&trajectory.currents)
    {
        writer.write_record([time.to_string(), temperature.to_string(), current.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(feature = "plot")]
fn run_with_plot(simulation: &Simulation) -> anyhow::Result<SimulationRun> {
    use ampline_core::Observer;
    use ampline_ieee738::{ConductorState, ThermalRates};
    use ampline_observers::{PlotObserver, ShowConfig};
    use ampline_solvers::transient::euler;

    let mut trace = transient_trace(simulation);
    let mut plot = PlotObserver::new(["conductor"]);

    let run = simulation
        .run_observed(
            TraceObserver::new("equilibrium"),
            |event: &euler::Event<'_, ConductorState, ThermalRates>| -> Option<euler::Action> {
                let _: Option<euler::Action> = trace.observe(event);
                let state = &event.snapshot.input;
                plot.record(state.time, [Some(state.temperature)]);
                None
            },
        )
        .context("simulation failed")?;

    plot.show(
        ShowConfig::new()
            .title("Conductor temperature")
            .x_label("time (s)")
            .y_label("°C")
            .log_x(),
    )
    .map_err(|e| anyhow::anyhow!("plot window failed: {e}"))?;
    Ok(run)
}

#[cfg(not(feature = "plot"))]
fn run_with_plot(_simulation: &Simulation) -> anyhow::Result<SimulationRun> {
    anyhow::bail!("plotting requires the `plot` feature")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_has_header_and_one_row_per_sample() {
        let trajectory = Trajectory {
            times: vec![0.0, 0.02, 0.04],
            temperatures: vec![65.5, 66.75, 66.5],
            currents: vec![20_000.0, 0.0, 0.0],
            melt: MeltOutcome::NotReached,
        };
        let mut out = Vec::new();
        write_csv(&trajectory, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "time_s,temperature_c,current_a",
                "0,65.5,20000",
                "0.02,66.75,0",
                "0.04,66.5,0",
            ]
        );
    }

    #[test]
    fn short_scenario_runs_end_to_end() {
        let mut file = ampline_ieee738::ScenarioFile::default();
        file.simulation.total_time_s = 2.0;
        let simulation = Simulation::from_file(&file).unwrap();

        let run = simulation
            .run_observed(TraceObserver::new("equilibrium"), transient_trace(&simulation))
            .unwrap();

        assert_eq!(run.trajectory.len(), simulation.waveform().len() + 1);
        assert_eq!(run.trajectory.melt, MeltOutcome::NotReached);
        // Load current before the fault, fault current one interval in.
        assert_eq!(run.trajectory.currents[0], 500.0);
        assert_eq!(run.trajectory.currents[5], 20_000.0);
    }

    #[cfg(not(feature = "plot"))]
    #[test]
    fn plot_without_feature_is_an_error() {
        let simulation = Simulation::from_file(&ampline_ieee738::ScenarioFile::default()).unwrap();
        assert!(run_with_plot(&simulation).is_err());
    }
}
