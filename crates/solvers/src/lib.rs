//! Numerical solvers for ampline.
//!
//! - [`equation::bisection`]: bracketed root finding with an iteration cap
//! - [`transient::euler`]: fixed-step explicit Euler integration
//!
//! Solvers are generic over [`ampline_core::Model`] and the problem traits in
//! `ampline-core`, and report progress only through an
//! [`ampline_core::Observer`] supplied by the caller.

pub mod equation;
pub mod transient;
