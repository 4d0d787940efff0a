use std::fmt::Debug;

use ampline_core::Observer;
use ampline_solvers::{equation::bisection, transient::euler};
use tracing::{debug, trace};

/// An observer that emits `tracing` events for solver progress.
///
/// Bisection iterations are logged at `debug` level. Euler steps are logged
/// at `trace` level, one in every `every` steps, since transient runs can take
/// hundreds of thousands of steps.
///
/// The observer never returns an action.
#[derive(Debug, Clone)]
pub struct TraceObserver {
    label: String,
    every: usize,
}

impl TraceObserver {
    /// Creates an observer that tags its events with `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            every: 1,
        }
    }

    /// Logs only every `n`-th Euler step. Zero is treated as one.
    #[must_use]
    pub fn every(mut self, n: usize) -> Self {
        self.every = n.max(1);
        self
    }

    /// Returns the label attached to emitted events.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<I, O> Observer<bisection::Event<'_, I, O>, bisection::Action> for TraceObserver {
    fn observe(&mut self, event: &bisection::Event<'_, I, O>) -> Option<bisection::Action> {
        let [left, right] = event.bracket;
        debug!(
            label = %self.label,
            iter = event.iter,
            x = event.x(),
            residual = event.residual(),
            left,
            right,
            "bisection iteration"
        );
        None
    }
}

impl<I: Debug, O: Debug> Observer<euler::Event<'_, I, O>, euler::Action> for TraceObserver {
    fn observe(&mut self, event: &euler::Event<'_, I, O>) -> Option<euler::Action> {
        if event.step % self.every == 0 {
            trace!(
                label = %self.label,
                step = event.step,
                input = ?event.snapshot.input,
                output = ?event.snapshot.output,
                "euler step"
            );
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{
        convert::Infallible,
        io::{self, Write},
        sync::{Arc, Mutex},
    };

    use ampline_core::{DerivativeOf, EquationProblem, Model, OdeProblem};
    use tracing::Level;

    /// In-memory sink for formatted log lines.
    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn lines_containing(&self, needle: &str) -> usize {
            let bytes = self.0.lock().unwrap();
            String::from_utf8_lossy(&bytes)
                .lines()
                .filter(|line| line.contains(needle))
                .count()
        }
    }

    fn capture(f: impl FnOnce()) -> Buffer {
        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        buffer
    }

    struct Identity;

    impl Model for Identity {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, input: &f64) -> Result<f64, Infallible> {
            Ok(*input)
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

    /// Constant heating at 1 °C per unit time.
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
            Ok(1.0)
        }

        fn build_input(&self, _base: &f64, state: &f64, _delta: &f64) -> Result<f64, Infallible> {
            Ok(*state)
        }
    }

    #[test]
    fn logs_every_bisection_iteration() {
        let mut iters = 0;
        let buffer = capture(|| {
            let solution = bisection::solve(
                &Identity,
                &Target(0.3),
                [0.0, 1.0],
                &bisection::Config {
                    max_iters: 50,
                    residual_tol: 1e-3,
                },
                TraceObserver::new("root"),
            )
            .unwrap();
            iters = solution.iters;
        });

        assert!(iters > 0);
        assert_eq!(buffer.lines_containing("bisection iteration"), iters);
        assert_eq!(buffer.lines_containing("label=root"), iters);
    }

    #[test]
    fn thins_out_euler_steps() {
        let buffer = capture(|| {
            euler::solve(&Identity, &Heating, 0.0, 0.5, 10, TraceObserver::new("heat").every(5))
                .unwrap();
        });

        // Steps 0, 5 and 10.
        assert_eq!(buffer.lines_containing("euler step"), 3);
    }

    #[test]
    fn zero_interval_logs_every_step() {
        let observer = TraceObserver::new("x").every(0);
        assert_eq!(observer.every, 1);
        assert_eq!(observer.label(), "x");
    }
}
