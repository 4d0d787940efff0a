//! Conductor temperature under a time-varying current.
//!
//! ```text
//! dTc/dt = (R(Tc[x]) * I[x+1]² + q_s - q_cn(Tc[x]) - q_r(Tc[x])) / mCp
//! ```
//!
//! Stepped with forward Euler at a fixed `dt`. The rate at step `x` uses the
//! temperature at step `x` and the current over the interval `x -> x+1`.
//! Every step of the waveform is simulated, even after the melt threshold is
//! crossed.

use std::convert::Infallible;

use ampline_core::{DerivativeOf, Model, Observer, OdeProblem};
use ampline_solvers::transient::euler;
use thiserror::Error;

use crate::{
    conductor::ConductorParameters,
    heat_balance::{HeatBalanceError, HeatTerms},
    waveform::CurrentWaveform,
};

/// Model input: the conductor at one point of the time grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConductorState {
    pub step: usize,
    /// Elapsed time (s).
    pub time: f64,
    /// Conductor temperature (°C).
    pub temperature: f64,
    /// Current over the interval that starts here (A).
    pub current: f64,
}

/// Model output: heat-balance terms and the resulting rate of change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalRates {
    pub terms: HeatTerms,
    /// `dTc/dt` in °C/s.
    pub rate: f64,
}

/// Lumped thermal model of a unit length of conductor.
#[derive(Debug, Clone, Copy)]
pub struct ThermalModel<'a> {
    params: &'a ConductorParameters,
}

impl<'a> ThermalModel<'a> {
    #[must_use]
    pub fn new(params: &'a ConductorParameters) -> Self {
        Self { params }
    }
}

impl Model for ThermalModel<'_> {
    type Input = ConductorState;
    type Output = ThermalRates;
    type Error = HeatBalanceError;

    fn call(&self, state: &ConductorState) -> Result<ThermalRates, HeatBalanceError> {
        let terms = self.params.heat_terms(state.temperature)?;
        Ok(ThermalRates {
            terms,
            rate: terms.net_heating(state.current) / self.params.heat_capacity(),
        })
    }
}

/// Integrates temperature over time, reading the current from a waveform.
struct WaveformDriven<'a> {
    waveform: &'a CurrentWaveform,
}

impl OdeProblem for WaveformDriven<'_> {
    type Input = ConductorState;
    type Output = ThermalRates;
    type Delta = f64;
    type State = f64;
    type Error = Infallible;

    fn state(&self, input: &ConductorState) -> Result<f64, Infallible> {
        Ok(input.temperature)
    }

    fn derivative(
        &self,
        _input: &ConductorState,
        output: &ThermalRates,
    ) -> Result<DerivativeOf<f64, f64>, Infallible> {
        Ok(output.rate)
    }

    fn build_input(
        &self,
        base: &ConductorState,
        temperature: &f64,
        dt: &f64,
    ) -> Result<ConductorState, Infallible> {
        let step = base.step + 1;
        Ok(ConductorState {
            step,
            time: base.time + dt,
            temperature: *temperature,
            current: self.waveform.interval_current(step),
        })
    }
}

/// Whether the conductor reached its melting point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeltOutcome {
    NotReached,
    /// First crossing of the threshold. Later crossings are ignored.
    Reached { time: f64, step: usize },
}

impl MeltOutcome {
    #[must_use]
    pub fn is_reached(&self) -> bool {
        matches!(self, Self::Reached { .. })
    }

    /// Time of the first crossing (s), if any.
    #[must_use]
    pub fn time_to_melt(&self) -> Option<f64> {
        match self {
            Self::Reached { time, .. } => Some(*time),
            Self::NotReached => None,
        }
    }
}

/// Result of a transient run: `N + 1` samples for a waveform of `N`.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    /// Sample times (s), starting at zero.
    pub times: Vec<f64>,
    /// Conductor temperatures (°C), starting at the initial temperature.
    pub temperatures: Vec<f64>,
    /// Current over the interval starting at each sample (A). The last entry
    /// repeats the final waveform sample.
    pub currents: Vec<f64>,
    pub melt: MeltOutcome,
}

impl Trajectory {
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`; a trajectory holds at least its initial sample.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Hottest sample as `(time, temperature)`.
    #[must_use]
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.times
            .iter()
            .zip(&self.temperatures)
            .fold(None, |peak: Option<(f64, f64)>, (&t, &temperature)| match peak {
                Some((_, hottest)) if hottest >= temperature => peak,
                _ => Some((t, temperature)),
            })
    }

    /// Last sample as `(time, temperature)`.
    #[must_use]
    pub fn last(&self) -> Option<(f64, f64)> {
        Some((*self.times.last()?, *self.temperatures.last()?))
    }
}

/// Errors from [`integrate`].
#[derive(Debug, Error)]
pub enum TransientError {
    #[error("time step must be finite and positive, got {0} s")]
    InvalidTimeStep(f64),

    #[error("initial temperature must be finite, got {0} °C")]
    InvalidInitialTemperature(f64),

    #[error("melt threshold {threshold} °C must be finite and above ambient {ambient} °C")]
    MeltThresholdNotAboveAmbient { threshold: f64, ambient: f64 },

    #[error("heat balance failed while integrating")]
    Integration(#[source] euler::Error),
}

/// Integrates the conductor temperature from `initial_temperature` under
/// `waveform` with a fixed step `dt`, latching the first melt crossing.
///
/// # Errors
///
/// Rejects a non-positive or non-finite `dt`, a non-finite initial
/// temperature, or a threshold not above ambient before doing any work. Fails
/// if the heat balance cannot be evaluated at some step.
pub fn integrate(
    initial_temperature: f64,
    waveform: &CurrentWaveform,
    params: &ConductorParameters,
    dt: f64,
    melt_threshold: f64,
) -> Result<Trajectory, TransientError> {
    integrate_observed(initial_temperature, waveform, params, dt, melt_threshold, ())
}

/// Like [`integrate`], passing every Euler step to `observer`.
///
/// Actions returned by the observer are ignored: the full waveform is always
/// simulated.
///
/// # Errors
///
/// See [`integrate`].
pub fn integrate_observed<Obs>(
    initial_temperature: f64,
    waveform: &CurrentWaveform,
    params: &ConductorParameters,
    dt: f64,
    melt_threshold: f64,
    mut observer: Obs,
) -> Result<Trajectory, TransientError>
where
    Obs: for<'a> Observer<euler::Event<'a, ConductorState, ThermalRates>, euler::Action>,
{
    if !(dt.is_finite() && dt > 0.0) {
        return Err(TransientError::InvalidTimeStep(dt));
    }
    if !initial_temperature.is_finite() {
        return Err(TransientError::InvalidInitialTemperature(initial_temperature));
    }
    let ambient = params.ambient();
    if !(melt_threshold.is_finite() && melt_threshold > ambient) {
        return Err(TransientError::MeltThresholdNotAboveAmbient {
            threshold: melt_threshold,
            ambient,
        });
    }

    let initial = ConductorState {
        step: 0,
        time: 0.0,
        temperature: initial_temperature,
        current: waveform.interval_current(0),
    };

    let mut melt = MeltOutcome::NotReached;
    let latch = |event: &euler::Event<'_, ConductorState, ThermalRates>| -> Option<euler::Action> {
        let state = &event.snapshot.input;
        if event.step > 0 && !melt.is_reached() && state.temperature >= melt_threshold {
            melt = MeltOutcome::Reached {
                time: state.time,
                step: event.step,
            };
        }
        observer.observe(event);
        None
    };

    let solution = euler::solve(
        &ThermalModel::new(params),
        &WaveformDriven { waveform },
        initial,
        dt,
        waveform.len(),
        latch,
    )
    .map_err(TransientError::Integration)?;

    let len = solution.history.len();
    let mut trajectory = Trajectory {
        times: Vec::with_capacity(len),
        temperatures: Vec::with_capacity(len),
        currents: Vec::with_capacity(len),
        melt,
    };
    for snapshot in &solution.history {
        trajectory.times.push(snapshot.input.time);
        trajectory.temperatures.push(snapshot.input.temperature);
        trajectory.currents.push(snapshot.input.current);
    }
    Ok(trajectory)
}
