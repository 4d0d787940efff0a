use crate::equation::Evaluation;

/// Event emitted by the bisection solver after each midpoint evaluation.
#[derive(Debug)]
pub struct Event<'a, I, O> {
    /// Iteration counter, starting at 1.
    pub iter: usize,
    /// Bracket the midpoint was taken from.
    pub bracket: [f64; 2],
    /// Evaluation at the midpoint.
    pub eval: &'a Evaluation<I, O, 1>,
}

impl<I, O> Event<'_, I, O> {
    /// Returns the evaluated midpoint.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.eval.x[0]
    }

    /// Returns the residual at the midpoint.
    #[must_use]
    pub fn residual(&self) -> f64 {
        self.eval.residuals[0]
    }
}
