use std::fmt;

use crate::{
    equilibrium::Equilibrium,
    time_constant::TimeConstantError,
    transient::{MeltOutcome, Trajectory},
};

/// Summary of a fault-and-reclosure run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationReport {
    pub steady_current: f64,
    pub fault_current: f64,
    /// Steady-state temperature before the fault (°C).
    pub initial_temperature: f64,
    pub equilibrium_iterations: usize,
    /// Hottest point as `(time, temperature)`.
    pub peak: (f64, f64),
    /// Last point as `(time, temperature)`.
    pub last: (f64, f64),
    pub melt_point: f64,
    pub melt: MeltOutcome,
    /// Thermal time constant (s), or why it could not be estimated.
    pub time_constant: Result<f64, TimeConstantError>,
    pub time_step: f64,
    pub steps: usize,
}

impl SimulationReport {
    /// Builds a report from a finished run.
    ///
    /// Returns `None` for an empty trajectory.
    #[must_use]
    pub fn new(
        equilibrium: &Equilibrium,
        trajectory: &Trajectory,
        steady_current: f64,
        fault_current: f64,
        melt_point: f64,
        time_step: f64,
        time_constant: Result<f64, TimeConstantError>,
    ) -> Option<Self> {
        Some(Self {
            steady_current,
            fault_current,
            initial_temperature: equilibrium.temperature,
            equilibrium_iterations: equilibrium.iterations,
            peak: trajectory.peak()?,
            last: trajectory.last()?,
            melt_point,
            melt: trajectory.melt,
            time_constant,
            time_step,
            steps: trajectory.len() - 1,
        })
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "steady state   {:.1} A -> {:.3} °C ({} iterations)",
            self.steady_current, self.initial_temperature, self.equilibrium_iterations
        )?;
        writeln!(f, "fault current  {:.1} A", self.fault_current)?;
        writeln!(
            f,
            "integration    {} steps of {} s ({:.1} s)",
            self.steps, self.time_step, self.last.0
        )?;
        writeln!(
            f,
            "peak           {:.3} °C at {:.3} s",
            self.peak.1, self.peak.0
        )?;
        writeln!(
            f,
            "final          {:.3} °C at {:.1} s",
            self.last.1, self.last.0
        )?;
        match self.melt {
            MeltOutcome::NotReached => writeln!(
                f,
                "melt           not reached (melting point {:.1} °C)",
                self.melt_point
            )?,
            MeltOutcome::Reached { time, step } => writeln!(
                f,
                "melt           reached {:.1} °C at {time:.3} s (step {step})",
                self.melt_point
            )?,
        }
        match self.time_constant {
            Ok(tau) => write!(
                f,
                "time constant  {tau:.4} s (valid only if the final temperature has settled)"
            ),
            Err(err) => write!(f, "time constant  n/a ({err})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::heat_balance::HeatTerms;

    fn equilibrium() -> Equilibrium {
        Equilibrium {
            temperature: 65.2108,
            current: 500.004,
            iterations: 22,
            terms: HeatTerms {
                temperature: 65.2108,
                resistance: 8.413e-5,
                convection: 22.0,
                radiation: 10.5,
                solar: 11.5,
            },
        }
    }

    fn trajectory(melt: MeltOutcome) -> Trajectory {
        Trajectory {
            times: vec![0.0, 0.02, 0.04, 0.06],
            temperatures: vec![65.2, 66.4, 67.6, 67.5],
            currents: vec![20_000.0, 20_000.0, 0.0, 0.0],
            melt,
        }
    }

    #[test]
    fn summarises_the_run() {
        let report = SimulationReport::new(
            &equilibrium(),
            &trajectory(MeltOutcome::NotReached),
            500.0,
            20_000.0,
            660.0,
            0.02,
            Ok(-0.4),
        )
        .unwrap();

        assert_eq!(report.steps, 3);
        assert_eq!(report.peak, (0.04, 67.6));
        assert_eq!(report.last, (0.06, 67.5));

        let text = report.to_string();
        assert!(text.contains("65.211 °C (22 iterations)"));
        assert!(text.contains("not reached (melting point 660.0 °C)"));
        assert!(text.contains("time constant  -0.4000 s"));
    }

    #[test]
    fn reports_melt_time() {
        let report = SimulationReport::new(
            &equilibrium(),
            &trajectory(MeltOutcome::Reached {
                time: 0.04,
                step: 2,
            }),
            500.0,
            20_000.0,
            67.0,
            0.02,
            Err(TimeConstantError::EqualCurrents(500.0)),
        )
        .unwrap();

        let text = report.to_string();
        assert!(text.contains("reached 67.0 °C at 0.040 s (step 2)"));
        assert!(text.ends_with(
            "time constant  n/a (fault and steady currents have equal magnitude (500 A))"
        ));
    }
}
