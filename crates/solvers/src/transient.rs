//! Solvers for ODE problems stepped forward in time.

pub mod euler;
