//! Core traits and types for ampline.
//!
//! The conductor models in `ampline-ieee738` and the numerical solvers in
//! `ampline-solvers` only meet through the abstractions defined here:
//!
//! - [`Model`]: a deterministic callable from a typed input to a typed output
//! - [`Snapshot`]: an input/output pair captured from a model call
//! - [`Observer`]: receives solver events and optionally returns an action
//! - [`EquationProblem`], [`OdeProblem`]: adapt solver variables to model
//!   inputs and extract residuals or derivatives from model outputs
//! - [`StepIntegrable`]: a state that can be advanced by `derivative * delta`
//! - [`constraint`]: construction-time numeric invariants for parameters

pub mod constraint;

mod model;
mod observer;
mod problems;
mod step;

pub use model::{Model, Snapshot};
pub use observer::Observer;
pub use problems::{EquationProblem, OdeProblem};
pub use step::{DerivativeOf, StepIntegrable};
