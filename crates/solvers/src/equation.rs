//! Solvers for equation problems.
//!
//! An [`EquationProblem`] maps solver variables `x: [f64; N]` to model inputs,
//! calls the model, and computes residuals. Solvers in this module drive those
//! residuals toward zero.
//!
//! [`EquationProblem`]: ampline_core::EquationProblem

mod evaluate;

pub use evaluate::{EvalError, Evaluation, evaluate};

pub mod bisection;
