//! Fixed-step forward Euler integration.
//!
//! ```text
//! state_{n+1} = state_n + derivative(state_n) * dt
//! ```
//!
//! The derivative is evaluated once per step, at the start of the step. The
//! global error grows with the number of steps, so `dt` must be small against
//! the fastest time constant of the model; there is no step-size control.

mod action;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use ampline_core::{Model, Observer, OdeProblem, Snapshot, StepIntegrable};

/// Integrates an ODE problem using forward Euler.
///
/// The model is called once on `initial` and once after each of the `steps`
/// integration steps, so the returned history holds `steps + 1` snapshots.
/// The observer sees every snapshot, including the initial one as step 0.
///
/// # Errors
///
/// Returns an error if the model or problem fails at any step.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: P::Delta,
    steps: usize,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output>, Action>,
{
    let initial_output = model.call(&initial).map_err(|e| Error::model(0, e))?;

    let mut history = Vec::with_capacity(steps + 1);
    history.push(Snapshot::new(initial, initial_output));

    if let Some(Action::StopEarly) = observer.observe(&Event {
        step: 0,
        snapshot: &history[0],
    }) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            history,
            steps: 0,
        });
    }

    for step in 1..=steps {
        let next = advance(model, problem, &history[step - 1], dt.clone(), step)?;
        history.push(next);

        let event = Event {
            step,
            snapshot: &history[step],
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                history,
                steps: step,
            });
        }
    }

    Ok(Solution {
        status: Status::Complete,
        history,
        steps,
    })
}

/// Integrates an ODE problem using forward Euler without observation.
///
/// # Errors
///
/// Returns an error if the model or problem fails at any step.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: P::Delta,
    steps: usize,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone,
{
    solve(model, problem, initial, dt, steps, ())
}

/// Takes one explicit step from `current` and evaluates the model there.
fn advance<M, P>(
    model: &M,
    problem: &P,
    current: &Snapshot<M::Input, M::Output>,
    dt: P::Delta,
    step: usize,
) -> Result<Snapshot<M::Input, M::Output>, Error>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone,
{
    let state = problem
        .state(&current.input)
        .map_err(|e| Error::problem(step, e))?;
    let derivative = problem
        .derivative(&current.input, &current.output)
        .map_err(|e| Error::problem(step, e))?;

    let next_state = state.step(derivative, dt.clone());
    let next_input = problem
        .build_input(&current.input, &next_state, &dt)
        .map_err(|e| Error::problem(step, e))?;
    let next_output = model
        .call(&next_input)
        .map_err(|e| Error::model(step, e))?;

    Ok(Snapshot::new(next_input, next_output))
}
