/// A callable model that maps a typed input to a typed output.
///
/// Models must be deterministic. Solvers call the same model many times with
/// nearby inputs (a bisection midpoint, one Euler step after another) and rely
/// on identical inputs always producing identical outputs.
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Calls the model with the given input.
    ///
    /// # Errors
    ///
    /// Each model defines its own `Error` type for domain-specific failures.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// A captured input/output pair from a model call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> Snapshot<I, O> {
    /// Creates a new snapshot from input and output values.
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    /// Converts the snapshot into a plain `(input, output)` tuple.
    pub fn into_parts(self) -> (I, O) {
        (self.input, self.output)
    }
}
