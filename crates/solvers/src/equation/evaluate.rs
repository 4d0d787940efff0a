use thiserror::Error;

use ampline_core::{EquationProblem, Model, Snapshot};

/// The result of evaluating an equation problem at a given `x`.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O, const N: usize> {
    pub x: [f64; N],
    pub residuals: [f64; N],
    pub snapshot: Snapshot<I, O>,
}

/// Errors that can occur when evaluating an equation problem.
#[derive(Debug, Error)]
pub enum EvalError<ME, PE> {
    /// The model call failed.
    #[error("model call failed")]
    Model(#[source] ME),
    /// Failed to construct the input or compute residuals.
    #[error("problem error")]
    Problem(#[source] PE),
}

/// Evaluates the model in the context of an equation problem.
///
/// Maps `x` to a model input, calls the model, then computes residuals from
/// the input and output.
///
/// # Errors
///
/// Returns an error if input mapping, the model call, or residual computation fails.
pub fn evaluate<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x: [f64; N],
) -> Result<Evaluation<M::Input, M::Output, N>, EvalError<M::Error, P::Error>>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
{
    let input = problem.input(&x).map_err(EvalError::Problem)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    let residuals = problem
        .residuals(&input, &output)
        .map_err(EvalError::Problem)?;

    Ok(Evaluation {
        x,
        residuals,
        snapshot: Snapshot::new(input, output),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;

    struct Linear;

    impl Model for Linear {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, input: &f64) -> Result<f64, Infallible> {
            Ok(3.0 * input)
        }
    }

    struct Target(f64);

    impl EquationProblem<1> for Target {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn input(&self, x: &[f64; 1]) -> Result<f64, Infallible> {
            Ok(x[0])
        }

        fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Infallible> {
            Ok([output - self.0])
        }
    }

    #[test]
    fn evaluation_captures_snapshot_and_residual() {
        let eval = evaluate(&Linear, &Target(6.0), [4.0]).unwrap();

        assert_relative_eq!(eval.x[0], 4.0);
        assert_relative_eq!(eval.snapshot.output, 12.0);
        assert_relative_eq!(eval.residuals[0], 6.0);
    }
}
