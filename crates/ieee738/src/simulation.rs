//! A full run: equilibrium, transient and summary.

use ampline_core::Observer;
use ampline_solvers::{equation::bisection, transient::euler};
use thiserror::Error;

use crate::{
    config::{ConfigError, ScenarioFile},
    conductor::ConductorParameters,
    equilibrium::{Equilibrium, EquilibriumError, EquilibriumOptions, solve_equilibrium_with},
    heat_balance::HeatTerms,
    report::SimulationReport,
    scenario::ReclosureScheme,
    time_constant::estimate_time_constant,
    transient::{ConductorState, ThermalRates, Trajectory, TransientError, integrate_observed},
    waveform::CurrentWaveform,
};

/// Errors from setting up or running a [`Simulation`].
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("steady-state solve failed")]
    Equilibrium(#[from] EquilibriumError),

    #[error("transient integration failed")]
    Transient(#[from] TransientError),

    /// Kept for [`SimulationReport::new`], which accepts any trajectory;
    /// [`integrate_observed`] itself always returns the initial sample.
    #[error("transient produced no samples")]
    EmptyTrajectory,
}

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    pub equilibrium: Equilibrium,
    pub trajectory: Trajectory,
    pub report: SimulationReport,
}

/// A validated scenario, ready to run.
#[derive(Debug, Clone)]
pub struct Simulation {
    params: ConductorParameters,
    scheme: ReclosureScheme,
    waveform: CurrentWaveform,
    options: EquilibriumOptions,
    melt_point: f64,
}

impl Simulation {
    /// Validates a scenario file and samples its waveform.
    ///
    /// # Errors
    ///
    /// Fails if the conductor, environment or reclosure scheme is invalid.
    pub fn from_file(file: &ScenarioFile) -> Result<Self, SimulationError> {
        let params = file.parameters()?;
        let scheme = file.reclosure_scheme()?;
        let waveform = scheme.waveform().map_err(ConfigError::from)?;

        Ok(Self {
            params,
            scheme,
            waveform,
            options: file.equilibrium_options(),
            melt_point: file.simulation.melt_point_c,
        })
    }

    #[must_use]
    pub fn params(&self) -> &ConductorParameters {
        &self.params
    }

    #[must_use]
    pub fn scheme(&self) -> &ReclosureScheme {
        &self.scheme
    }

    #[must_use]
    pub fn waveform(&self) -> &CurrentWaveform {
        &self.waveform
    }

    /// Runs without observation.
    ///
    /// # Errors
    ///
    /// See [`Simulation::run_observed`].
    pub fn run(&self) -> Result<SimulationRun, SimulationError> {
        self.run_observed((), ())
    }

    /// Solves the pre-fault equilibrium at the steady current, integrates the
    /// fault sequence from there and summarises the result.
    ///
    /// `equilibrium_observer` sees each bisection iteration and
    /// `transient_observer` each Euler step.
    ///
    /// # Errors
    ///
    /// Fails if the equilibrium search or the integration fails.
    pub fn run_observed<EqObs, TrObs>(
        &self,
        equilibrium_observer: EqObs,
        transient_observer: TrObs,
    ) -> Result<SimulationRun, SimulationError>
    where
        EqObs: for<'a> Observer<bisection::Event<'a, f64, HeatTerms>, bisection::Action>,
        TrObs: for<'a> Observer<euler::Event<'a, ConductorState, ThermalRates>, euler::Action>,
    {
        let steady = self.scheme.steady_current;
        let fault = self.scheme.fault_current;
        let dt = self.scheme.time_step();

        let equilibrium =
            solve_equilibrium_with(&self.params, steady, &self.options, equilibrium_observer)?;

        let trajectory = integrate_observed(
            equilibrium.temperature,
            &self.waveform,
            &self.params,
            dt,
            self.melt_point,
            transient_observer,
        )?;

        let time_constant = estimate_time_constant(&trajectory, &self.params, steady, fault);

        let report = SimulationReport::new(
            &equilibrium,
            &trajectory,
            steady,
            fault,
            self.melt_point,
            dt,
            time_constant,
        )
        .ok_or(SimulationError::EmptyTrajectory)?;

        Ok(SimulationRun {
            equilibrium,
            trajectory,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{time_constant::TimeConstantError, transient::MeltOutcome};

    fn short_file() -> ScenarioFile {
        let mut file = ScenarioFile::default();
        file.simulation.total_time_s = 5.0;
        file
    }

    #[test]
    fn short_run_reports_consistently() {
        let simulation = Simulation::from_file(&short_file()).unwrap();
        let run = simulation.run().unwrap();

        assert_eq!(run.trajectory.len(), 251);
        assert_eq!(run.report.steps, 250);
        assert_relative_eq!(run.trajectory.temperatures[0], run.equilibrium.temperature);
        assert_eq!(run.report.melt, MeltOutcome::NotReached);
        assert!(run.report.peak.1 > 80.0 && run.report.peak.1 < 660.0);
        assert!(run.report.time_constant.is_ok());
    }

    #[test]
    fn invalid_file_fails_before_running() {
        let mut file = short_file();
        file.conductor.diameter_mm = -1.0;

        assert!(matches!(
            Simulation::from_file(&file),
            Err(SimulationError::Config(ConfigError::Parameters(_)))
        ));
    }

    #[test]
    fn melt_point_below_ambient_is_rejected_at_run() {
        let mut file = short_file();
        file.simulation.melt_point_c = 10.0;

        let result = Simulation::from_file(&file).unwrap().run();
        assert!(matches!(
            result,
            Err(SimulationError::Transient(
                TransientError::MeltThresholdNotAboveAmbient { .. }
            ))
        ));
    }

    #[test]
    fn equal_currents_leave_the_reason_in_the_report() {
        let mut file = short_file();
        file.scenario.fault_current_a = file.scenario.steady_current_a;

        let run = Simulation::from_file(&file).unwrap().run().unwrap();

        assert_eq!(
            run.report.time_constant,
            Err(TimeConstantError::EqualCurrents(500.0))
        );
    }

    #[test]
    fn stopped_equilibrium_does_not_start_the_transient() {
        let simulation = Simulation::from_file(&short_file()).unwrap();
        let mut steps = 0;

        let result = simulation.run_observed(
            |_: &bisection::Event<'_, f64, HeatTerms>| Some(bisection::Action::StopEarly),
            |_: &euler::Event<'_, ConductorState, ThermalRates>| -> Option<euler::Action> {
                steps += 1;
                None
            },
        );

        assert!(matches!(
            result,
            Err(SimulationError::Equilibrium(EquilibriumError::Stopped { .. }))
        ));
        assert_eq!(steps, 0);
    }

    #[test]
    fn observers_see_both_phases() {
        let simulation = Simulation::from_file(&short_file()).unwrap();
        let mut iterations = 0;
        let mut steps = 0;

        let run = simulation
            .run_observed(
                |_: &bisection::Event<'_, f64, HeatTerms>| -> Option<bisection::Action> {
                    iterations += 1;
                    None
                },
                |_: &euler::Event<'_, ConductorState, ThermalRates>| -> Option<euler::Action> {
                    steps += 1;
                    None
                },
            )
            .unwrap();

        assert_eq!(iterations, run.equilibrium.iterations);
        assert_eq!(steps, run.trajectory.len());
    }
}
