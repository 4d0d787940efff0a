use crate::equation::Evaluation;

use super::{Solution, Status};

/// Tracks the evaluation with the smallest residual magnitude.
pub(super) struct Best<I, O> {
    eval: Evaluation<I, O, 1>,
}

impl<I, O> Best<I, O> {
    /// Starts tracking from a first evaluation.
    pub(super) fn new(eval: Evaluation<I, O, 1>) -> Self {
        Self { eval }
    }

    /// Replaces the tracked evaluation if `eval` has a strictly smaller residual.
    pub(super) fn update(&mut self, eval: Evaluation<I, O, 1>) {
        if eval.residuals[0].abs() < self.eval.residuals[0].abs() {
            self.eval = eval;
        }
    }

    /// Returns the tracked `(x, residual)` pair.
    pub(super) fn point(&self) -> (f64, f64) {
        (self.eval.x[0], self.eval.residuals[0])
    }

    /// Builds a solution from the tracked evaluation.
    pub(super) fn finish(self, status: Status, iters: usize) -> Solution<I, O> {
        Solution::from_eval(self.eval, status, iters)
    }
}
