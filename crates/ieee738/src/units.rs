//! Per-unit-length quantities used by conductor parameters.
//!
//! `uom` has no named units for resistance or heat capacity per metre of
//! conductor, so they are defined here as dimensioned aliases. Values are
//! built by dividing a `uom` quantity by a length, which keeps the dimension
//! checked at compile time.

use uom::{
    si::{
        ISQ, Quantity, SI,
        electrical_resistance::ohm,
        f64::{ElectricalResistance, HeatCapacity, Length},
        heat_capacity::joule_per_kelvin,
        length::meter,
    },
    typenum::{N1, N2, N3, P1, Z0},
};

/// Electrical resistance per unit length, Ω/m in SI.
pub type LinearResistance = Quantity<ISQ<P1, P1, N3, N2, Z0, Z0, Z0>, SI<f64>, f64>;

/// Heat capacity per unit length, J/m·K in SI.
///
/// This is the conductor's `mCp`: mass per metre times specific heat.
pub type LinearHeatCapacity = Quantity<ISQ<P1, P1, N2, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Creates a [`LinearResistance`] from a value in Ω/m.
#[must_use]
pub fn ohm_per_meter(value: f64) -> LinearResistance {
    ElectricalResistance::new::<ohm>(value) / Length::new::<meter>(1.0)
}

/// Creates a [`LinearHeatCapacity`] from a value in J/m·K (equivalently J/m·°C).
#[must_use]
pub fn joule_per_meter_kelvin(value: f64) -> LinearHeatCapacity {
    HeatCapacity::new::<joule_per_kelvin>(value) / Length::new::<meter>(1.0)
}
