/// A state that can be advanced by its derivative over a step.
///
/// Forward Euler only needs `state + derivative * delta`; implementing this
/// trait is what lets a state type be integrated by the generic solvers.
pub trait StepIntegrable<Delta> {
    /// The derivative of the state with respect to `Delta`.
    type Derivative;

    /// Returns the state after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// Shorthand for the derivative type of a [`StepIntegrable`] state.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;

/// A plain scalar state, e.g. a temperature in °C stepped over seconds.
impl StepIntegrable<f64> for f64 {
    type Derivative = f64;

    fn step(&self, derivative: f64, delta: f64) -> Self {
        self + derivative * delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn scalar_step_is_explicit_euler() {
        let temperature = 65.0_f64;
        let rate = 60.0; // °C/s
        let dt = 0.02;

        assert_relative_eq!(temperature.step(rate, dt), 66.2);
    }

    #[test]
    fn negative_rate_cools() {
        let temperature = 84.5_f64;
        assert_relative_eq!(temperature.step(-0.5, 2.0), 83.5);
    }
}
