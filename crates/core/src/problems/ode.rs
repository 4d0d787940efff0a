use crate::{DerivativeOf, StepIntegrable};

/// Defines an ODE problem to be integrated.
///
/// An ODE problem extracts a state from model input, computes the state's
/// derivative from model input and output, and rebuilds the next model input
/// from a stepped state. Anything that is not part of the integrated state,
/// such as the time stamp or the current driving the next interval, is filled
/// in by [`OdeProblem::build_input`].
pub trait OdeProblem {
    type Input;
    type Output;
    type Delta;
    type State: StepIntegrable<Self::Delta>;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Extracts the integrated state from model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the state cannot be extracted.
    fn state(&self, input: &Self::Input) -> Result<Self::State, Self::Error>;

    /// Computes the derivative of the state from model input and output.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be computed.
    fn derivative(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<DerivativeOf<Self::State, Self::Delta>, Self::Error>;

    /// Builds the next model input from the previous input, the stepped state
    /// and the step size.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the next input cannot be constructed.
    fn build_input(
        &self,
        base: &Self::Input,
        state: &Self::State,
        delta: &Self::Delta,
    ) -> Result<Self::Input, Self::Error>;
}
