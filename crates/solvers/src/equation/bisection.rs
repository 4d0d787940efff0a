//! Bisection root finding with a hard iteration cap.
//!
//! The solver needs a bracket whose endpoint residuals have opposite signs. It
//! then halves the bracket, keeping the half whose endpoints still disagree in
//! sign, until the midpoint residual is within `residual_tol`.
//!
//! The loop never runs unbounded. If `max_iters` midpoints are evaluated
//! without meeting the tolerance the solve fails with [`Error::MaxIters`],
//! carrying the best point seen so the caller can decide what to do with it.

mod action;
mod best;
mod bracket;
mod config;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use bracket::{Bracket, BracketError, Sign};
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use ampline_core::{EquationProblem, Model, Observer};

use crate::equation::{Evaluation, evaluate};

use best::Best;
use bracket::Bounds;

/// Finds a root of a scalar equation problem using bisection.
///
/// Both endpoints are evaluated first. An endpoint already within tolerance
/// is returned immediately with zero iterations. Otherwise the observer sees
/// every midpoint evaluation and may stop the solve early.
///
/// # Errors
///
/// Returns an error if the config or bracket is invalid, the endpoints do not
/// bracket a root, an evaluation fails or produces a non-finite residual, or
/// the iteration cap is reached before converging.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output>, Action>,
{
    config.validate()?;
    let bounds = Bounds::new(bracket)?;
    let [left, right] = bounds.as_array();

    let left_eval = checked_eval(model, problem, left)?;
    if left_eval.residuals[0].abs() <= config.residual_tol {
        return Ok(Solution::from_eval(left_eval, Status::Converged, 0));
    }

    let right_eval = checked_eval(model, problem, right)?;
    if right_eval.residuals[0].abs() <= config.residual_tol {
        return Ok(Solution::from_eval(right_eval, Status::Converged, 0));
    }

    let left_residual = left_eval.residuals[0];
    let right_residual = right_eval.residuals[0];
    let mut bracket = Bracket::new(bounds, Sign::of(left_residual), Sign::of(right_residual))
        .map_err(|_| Error::NoSignChange {
            left,
            right,
            left_residual,
            right_residual,
        })?;

    let mut best = Best::new(left_eval);
    best.update(right_eval);

    for iter in 1..=config.max_iters {
        let mid = bracket.midpoint();
        let mid_eval = checked_eval(model, problem, mid)?;
        let mid_residual = mid_eval.residuals[0];

        let event = Event {
            iter,
            bracket: bracket.as_array(),
            eval: &mid_eval,
        };
        let action = observer.observe(&event);

        if mid_residual.abs() <= config.residual_tol {
            return Ok(Solution::from_eval(mid_eval, Status::Converged, iter));
        }

        bracket.shrink(mid, Sign::of(mid_residual));
        best.update(mid_eval);

        if let Some(Action::StopEarly) = action {
            return Ok(best.finish(Status::StoppedByObserver, iter));
        }
    }

    let (x, residual) = best.point();
    Err(Error::MaxIters {
        iters: config.max_iters,
        best_x: x,
        best_residual: residual,
    })
}

/// Runs bisection without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    solve(model, problem, bracket, config, ())
}

/// Evaluates at `x` and rejects non-finite residuals.
fn checked_eval<M, P>(
    model: &M,
    problem: &P,
    x: f64,
) -> Result<Evaluation<M::Input, M::Output, 1>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    let eval = evaluate(model, problem, [x])?;
    let residual = eval.residuals[0];
    if residual.is_finite() {
        Ok(eval)
    } else {
        Err(Error::NonFiniteResidual { x, residual })
    }
}
