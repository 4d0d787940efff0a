use ampline_core::Snapshot;

use crate::equation::Evaluation;

/// How a successful bisection solve finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The residual is within the configured tolerance.
    Converged,
    /// An observer asked the solver to stop.
    StoppedByObserver,
}

/// The result of a bisection solve.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    pub status: Status,
    /// Root estimate.
    pub x: f64,
    /// Residual at `x`.
    pub residual: f64,
    /// Model input and output at `x`.
    pub snapshot: Snapshot<I, O>,
    /// Number of midpoint evaluations performed.
    pub iters: usize,
}

impl<I, O> Solution<I, O> {
    pub(super) fn from_eval(eval: Evaluation<I, O, 1>, status: Status, iters: usize) -> Self {
        Self {
            status,
            x: eval.x[0],
            residual: eval.residuals[0],
            snapshot: eval.snapshot,
            iters,
        }
    }
}
