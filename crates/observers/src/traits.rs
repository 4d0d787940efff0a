//! Capability traits for observers that work across solvers.
//!
//! Event traits:
//!
//! - [`HasResidual`]: events that carry a residual value
//! - [`HasIteration`]: events numbered by iteration or step
//!
//! Action traits:
//!
//! - [`CanStopEarly`]: actions that can end a solve early
//!
//! # Example
//!
//! ```rust
//! use ampline_core::Observer;
//! use ampline_observers::traits::{CanStopEarly, HasIteration, HasResidual};
//!
//! /// Stops once the residual is small, but not before `min_iters`.
//! struct GoodEnough {
//!     tolerance: f64,
//!     min_iters: usize,
//! }
//!
//! impl<E: HasResidual + HasIteration, A: CanStopEarly> Observer<E, A> for GoodEnough {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.iteration() >= self.min_iters && event.residual().abs() < self.tolerance)
//!             .then(A::stop_early)
//!     }
//! }
//! ```

use ampline_solvers::{equation::bisection, transient::euler};

/// An event that carries a residual value.
pub trait HasResidual {
    fn residual(&self) -> f64;
}

/// An event that knows how far the solver has progressed.
pub trait HasIteration {
    /// Bisection iteration (from 1) or Euler step (from 0).
    fn iteration(&self) -> usize;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    fn stop_early() -> Self;
}

impl<I, O> HasResidual for bisection::Event<'_, I, O> {
    fn residual(&self) -> f64 {
        self.eval.residuals[0]
    }
}

impl<I, O> HasIteration for bisection::Event<'_, I, O> {
    fn iteration(&self) -> usize {
        self.iter
    }
}

impl<I, O> HasIteration for euler::Event<'_, I, O> {
    fn iteration(&self) -> usize {
        self.step
    }
}

impl CanStopEarly for bisection::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanStopEarly for euler::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use ampline_core::{DerivativeOf, EquationProblem, Model, Observer, OdeProblem};

    /// Stops any solver at a fixed iteration.
    struct StopAt(usize);

    impl<E: HasIteration, A: CanStopEarly> Observer<E, A> for StopAt {
        fn observe(&mut self, event: &E) -> Option<A> {
            (event.iteration() == self.0).then(A::stop_early)
        }
    }

    /// Stops once the residual is within a loose tolerance.
    struct Loose(f64);

    impl<E: HasResidual, A: CanStopEarly> Observer<E, A> for Loose {
        fn observe(&mut self, event: &E) -> Option<A> {
            (event.residual().abs() < self.0).then(A::stop_early)
        }
    }

    struct Cube;

    impl Model for Cube {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, input: &f64) -> Result<f64, Infallible> {
            Ok(input.powi(3))
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

    /// Constant heating at 2 °C/s.
    struct Heating;

    impl OdeProblem for Heating {
        type Input = f64;
        type Output = f64;
        type Delta = f64;
        type State = f64;
        type Error = Infallible;

        fn state(&self, input: &f64) -> Result<f64, Infallible> {
            Ok(*input)
        }

        fn derivative(&self, _input: &f64, _output: &f64) -> Result<DerivativeOf<f64, f64>, Infallible> {
            Ok(2.0)
        }

        fn build_input(&self, _base: &f64, state: &f64, _delta: &f64) -> Result<f64, Infallible> {
            Ok(*state)
        }
    }

    #[test]
    fn same_observer_stops_both_solvers() {
        let config = bisection::Config::default();
        let root = bisection::solve(&Cube, &Target(27.0), [0.0, 10.0], &config, StopAt(4)).unwrap();
        assert_eq!(root.status, bisection::Status::StoppedByObserver);
        assert_eq!(root.iters, 4);

        let run = euler::solve(&Cube, &Heating, 0.0, 0.5, 100, StopAt(4)).unwrap();
        assert_eq!(run.status, euler::Status::StoppedByObserver);
        assert_eq!(run.steps, 4);
    }

    #[test]
    fn residual_observer_stops_before_tight_tolerance() {
        let config = bisection::Config::default();
        let tight = bisection::solve_unobserved(&Cube, &Target(27.0), [0.0, 10.0], &config).unwrap();
        let loose = bisection::solve(&Cube, &Target(27.0), [0.0, 10.0], &config, Loose(0.5)).unwrap();

        assert_eq!(loose.status, bisection::Status::StoppedByObserver);
        assert!(loose.iters < tight.iters);
        assert!((loose.x - 3.0).abs() < 0.1);
    }
}
