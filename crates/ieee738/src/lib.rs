//! Bare overhead conductor temperature under fault currents, after IEEE 738.
//!
//! The crate has two numerical components, both built on one shared
//! heat-balance primitive ([`ConductorParameters::heat_terms`]):
//!
//! - [`solve_equilibrium`]: the steady-state conductor temperature for a
//!   load current, found by bounded bisection on temperature.
//! - [`integrate`]: the temperature trajectory under a [`CurrentWaveform`],
//!   stepped with forward Euler, with a latched [`MeltOutcome`].
//!
//! Around them sit the reference fault-and-reclosure scenario
//! ([`ReclosureScheme`]), the thermal time-constant estimate
//! ([`estimate_time_constant`]), the TOML scenario file ([`ScenarioFile`]) and
//! a [`Simulation`] that chains everything into a [`SimulationReport`].
//!
//! All temperatures are in °C, currents in A (RMS), times in s, and the
//! empirical IEEE 738 formulas take the conductor diameter in mm.

mod conductor;
mod config;
mod equilibrium;
mod heat_balance;
mod report;
mod scenario;
mod simulation;
mod solar;
mod time_constant;
mod transient;
mod waveform;

pub mod units;

pub use conductor::{
    ConductorConfig, ConductorParameters, EnvironmentConfig, ParameterError, ResistanceReference,
};
pub use config::{
    ConductorSection, ConfigError, EnvironmentSection, ScenarioFile, ScenarioSection,
    SimulationSection, SolarSection,
};
pub use equilibrium::{
    BalancingCurrent, Equilibrium, EquilibriumError, EquilibriumOptions, TargetCurrent,
    solve_equilibrium, solve_equilibrium_with,
};
pub use heat_balance::{HeatBalanceError, HeatTerms};
pub use report::SimulationReport;
pub use scenario::{BreakerState, ReclosureScheme, ScenarioError, Segment};
pub use simulation::{Simulation, SimulationError, SimulationRun};
pub use solar::{SolarConfig, SolarGain};
pub use time_constant::{TimeConstantError, estimate_time_constant};
pub use transient::{
    ConductorState, MeltOutcome, ThermalModel, ThermalRates, Trajectory, TransientError,
    integrate, integrate_observed,
};
pub use waveform::{CurrentWaveform, WaveformError};
