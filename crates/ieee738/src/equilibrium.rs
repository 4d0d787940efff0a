//! Steady-state conductor temperature for a constant current.
//!
//! The balancing current rises with temperature, so the equilibrium is found
//! by bisection on temperature between ambient and a ceiling far above any
//! physical conductor temperature. The search is bounded; running out of
//! iterations is an error, never a silent best guess.

use std::convert::Infallible;

use ampline_core::{EquationProblem, Model, Observer};
use ampline_solvers::equation::bisection;
use thiserror::Error;

use crate::{
    conductor::ConductorParameters,
    heat_balance::{HeatBalanceError, HeatTerms},
};

/// Model mapping a conductor temperature to its heat-balance terms.
#[derive(Debug, Clone, Copy)]
pub struct BalancingCurrent<'a> {
    params: &'a ConductorParameters,
}

impl<'a> BalancingCurrent<'a> {
    #[must_use]
    pub fn new(params: &'a ConductorParameters) -> Self {
        Self { params }
    }
}

impl Model for BalancingCurrent<'_> {
    type Input = f64;
    type Output = HeatTerms;
    type Error = HeatBalanceError;

    fn call(&self, temperature: &f64) -> Result<HeatTerms, HeatBalanceError> {
        self.params.heat_terms(*temperature)
    }
}

/// Equation problem whose residual is the balancing current minus a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetCurrent {
    pub current: f64,
}

impl EquationProblem<1> for TargetCurrent {
    type Input = f64;
    type Output = HeatTerms;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Infallible> {
        Ok(x[0])
    }

    fn residuals(&self, _input: &f64, terms: &HeatTerms) -> Result<[f64; 1], Infallible> {
        Ok([terms.balancing_current() - self.current])
    }
}

/// Settings for [`solve_equilibrium_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquilibriumOptions {
    /// Converged once the balancing current is within this many amperes.
    pub tolerance: f64,
    pub max_iterations: usize,
    /// Upper end of the temperature search (°C).
    ///
    /// Defaults to `1000 * Ta`, or `Ta + 25000` when the ambient temperature
    /// is not positive.
    pub ceiling: Option<f64>,
}

impl Default for EquilibriumOptions {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            max_iterations: 100,
            ceiling: None,
        }
    }
}

/// A converged steady state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equilibrium {
    /// Steady-state conductor temperature, `Tc_ss` (°C).
    pub temperature: f64,
    /// Balancing current at that temperature (A).
    pub current: f64,
    /// Midpoint evaluations performed by the search.
    pub iterations: usize,
    pub terms: HeatTerms,
}

/// Errors from the equilibrium search.
#[derive(Debug, Error)]
pub enum EquilibriumError {
    #[error("target current must be finite and non-negative, got {0} A")]
    InvalidCurrent(f64),

    #[error("current tolerance must be finite and non-negative, got {0} A")]
    InvalidTolerance(f64),

    #[error("search ceiling {ceiling} °C must be finite and above ambient {ambient} °C")]
    InvalidCeiling { ambient: f64, ceiling: f64 },

    #[error(
        "{target} A is outside the {low} A to {high} A carried between {lower} °C and {upper} °C"
    )]
    OutOfRange {
        target: f64,
        lower: f64,
        upper: f64,
        low: f64,
        high: f64,
    },

    #[error(
        "no convergence after {iterations} iterations (best {best_temperature} °C, {best_error} A off target)"
    )]
    NonConvergence {
        iterations: usize,
        best_temperature: f64,
        best_error: f64,
    },

    #[error(
        "search stopped after {iterations} iterations before converging (best {best_temperature} °C, {best_error} A off target)"
    )]
    Stopped {
        iterations: usize,
        best_temperature: f64,
        best_error: f64,
    },

    #[error("heat balance failed during the search")]
    Solver(#[source] bisection::Error),
}

/// Finds the steady-state temperature for `current` with default options and
/// the given current tolerance.
///
/// # Errors
///
/// See [`solve_equilibrium_with`].
pub fn solve_equilibrium(
    params: &ConductorParameters,
    current: f64,
    tolerance: f64,
) -> Result<Equilibrium, EquilibriumError> {
    let options = EquilibriumOptions {
        tolerance,
        ..EquilibriumOptions::default()
    };
    solve_equilibrium_with(params, current, &options, ())
}

/// Finds the steady-state temperature for `current`, reporting each
/// bisection iteration to `observer`.
///
/// An observer may stop the search early, but a stopped search has not
/// converged and is reported as [`EquilibriumError::Stopped`].
///
/// # Errors
///
/// Fails for an invalid current, tolerance or ceiling, when the current cannot
/// be carried anywhere in the search range, or when the search ends (by the
/// iteration cap or an observer) before converging.
pub fn solve_equilibrium_with<Obs>(
    params: &ConductorParameters,
    current: f64,
    options: &EquilibriumOptions,
    observer: Obs,
) -> Result<Equilibrium, EquilibriumError>
where
    Obs: for<'a> Observer<bisection::Event<'a, f64, HeatTerms>, bisection::Action>,
{
    if !(current.is_finite() && current >= 0.0) {
        return Err(EquilibriumError::InvalidCurrent(current));
    }
    if !(options.tolerance.is_finite() && options.tolerance >= 0.0) {
        return Err(EquilibriumError::InvalidTolerance(options.tolerance));
    }

    let ambient = params.ambient();
    let ceiling = options.ceiling.unwrap_or_else(|| default_ceiling(ambient));
    if !(ceiling.is_finite() && ceiling > ambient) {
        return Err(EquilibriumError::InvalidCeiling { ambient, ceiling });
    }

    let config = bisection::Config {
        max_iters: options.max_iterations,
        residual_tol: options.tolerance,
    };

    let solution = bisection::solve(
        &BalancingCurrent::new(params),
        &TargetCurrent { current },
        [ambient, ceiling],
        &config,
        observer,
    )
    .map_err(|err| match err {
        bisection::Error::NoSignChange {
            left,
            right,
            left_residual,
            right_residual,
        } => EquilibriumError::OutOfRange {
            target: current,
            lower: left,
            upper: right,
            low: left_residual + current,
            high: right_residual + current,
        },
        bisection::Error::MaxIters {
            iters,
            best_x,
            best_residual,
        } => EquilibriumError::NonConvergence {
            iterations: iters,
            best_temperature: best_x,
            best_error: best_residual,
        },
        other => EquilibriumError::Solver(other),
    })?;

    // A converged midpoint returns before the stop is honoured, so a stopped
    // search never met the tolerance.
    if solution.status == bisection::Status::StoppedByObserver {
        return Err(EquilibriumError::Stopped {
            iterations: solution.iters,
            best_temperature: solution.x,
            best_error: solution.residual,
        });
    }

    let terms = solution.snapshot.output;
    Ok(Equilibrium {
        temperature: solution.x,
        current: terms.balancing_current(),
        iterations: solution.iters,
        terms,
    })
}

fn default_ceiling(ambient: f64) -> f64 {
    if ambient > 0.0 {
        ambient * 1000.0
    } else {
        ambient + 25_000.0
    }
}
