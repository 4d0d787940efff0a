/// Defines an equation problem to be solved.
///
/// An equation problem maps solver variables `x` into a model input, then
/// computes residuals from the model input and output. Root finders drive the
/// residuals toward zero.
///
/// For the conductor equilibrium, `x` is a candidate conductor temperature and
/// the residual is the balancing current minus the target current.
///
/// The const generic `N` is the number of solver variables and residuals.
pub trait EquationProblem<const N: usize> {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Maps solver variables (`x`) into a model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input cannot be constructed from `x`.
    fn input(&self, x: &[f64; N]) -> Result<Self::Input, Self::Error>;

    /// Computes residuals from model input and output.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the residuals cannot be computed.
    fn residuals(&self, input: &Self::Input, output: &Self::Output)
    -> Result<[f64; N], Self::Error>;
}
