//! Reusable observers for ampline solvers.
//!
//! Solvers in `ampline-solvers` never log. Passing a [`TraceObserver`] as the
//! observer turns their events into `tracing` events, which the application
//! decides how to filter and print.
//!
//! # Modules
//!
//! - [`traits`]: capability traits that let one observer drive both the
//!   bisection and the Euler solver
//!
//! # Features
//!
//! - `plot`: enables [`PlotObserver`], which collects traces during a solve and
//!   shows them in an egui window. Adds `eframe` and `egui_plot`.

pub mod traits;

mod trace;

#[cfg(feature = "plot")]
mod plot;

pub use trace::TraceObserver;

#[cfg(feature = "plot")]
pub use plot::{PlotObserver, Plottable, ShowConfig};
