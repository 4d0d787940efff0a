use ampline_core::constraint::{
    Constrained, Constraint, ConstraintError, NonNegative, StrictlyPositive, UnitInterval,
};
use thiserror::Error;
use uom::si::{
    f64::{Length, MassDensity, ThermodynamicTemperature},
    length::{meter, millimeter},
    mass_density::kilogram_per_cubic_meter,
    thermodynamic_temperature::degree_celsius,
};

use crate::{
    solar::{SolarConfig, SolarGain},
    units::{LinearHeatCapacity, LinearResistance},
};

/// Conductor resistance measured at one temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResistanceReference {
    pub temperature: ThermodynamicTemperature,
    pub resistance: LinearResistance,
}

/// Physical and electrical description of a bare conductor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConductorConfig {
    /// Outside diameter, `D`.
    pub diameter: Length,
    /// Projected area per unit length (m²/m). Defaults to the diameter.
    pub projected_area: Option<Length>,
    /// Heat capacity per unit length, `mCp`.
    pub heat_capacity: LinearHeatCapacity,
    /// Resistance at the low reference temperature.
    pub low_reference: ResistanceReference,
    /// Resistance at the high reference temperature.
    pub high_reference: ResistanceReference,
    /// Emissivity of the conductor surface, `epsilon`.
    pub emissivity: f64,
    /// Solar absorptivity of the conductor surface, `alpha`.
    pub absorptivity: f64,
}

/// Surroundings of the line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentConfig {
    /// Ambient air temperature, `Ta`.
    pub ambient: ThermodynamicTemperature,
    /// Density of air, `rho_f`.
    pub air_density: MassDensity,
    /// Elevation of the conductor above sea level, `H_e`.
    pub elevation: Length,
    pub solar: SolarConfig,
}

/// Errors raised while validating conductor and environment inputs.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParameterError {
    #[error("{name} is invalid: {source}")]
    Invalid {
        name: &'static str,
        #[source]
        source: ConstraintError,
    },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("resistance reference temperatures must differ, both are {temperature} °C")]
    IdenticalReferenceTemperatures { temperature: f64 },
}

/// Validated, immutable inputs to the IEEE 738 heat balance.
///
/// Values are stored in the engineering units the empirical formulas expect:
/// diameter in mm, temperatures in °C, resistance in Ω/m and heat capacity in
/// J/m·°C. The solar heat gain is evaluated once, here.
#[derive(Debug, Clone, PartialEq)]
pub struct ConductorParameters {
    pub(crate) diameter: f64,
    pub(crate) projected_area: f64,
    pub(crate) heat_capacity: f64,
    pub(crate) low_temperature: f64,
    pub(crate) low_resistance: f64,
    pub(crate) high_temperature: f64,
    pub(crate) high_resistance: f64,
    pub(crate) emissivity: f64,
    pub(crate) ambient: f64,
    pub(crate) air_density: f64,
    pub(crate) solar: SolarGain,
    pub(crate) solar_heating: f64,
}

impl ConductorParameters {
    /// Validates the inputs and derives the solar heat gain.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] naming the first input that is out of
    /// range, not finite, or if both resistance references share a temperature.
    pub fn new(
        conductor: &ConductorConfig,
        environment: &EnvironmentConfig,
    ) -> Result<Self, ParameterError> {
        let diameter = checked::<StrictlyPositive>("diameter", conductor.diameter.get::<millimeter>())?;
        let projected_area = match conductor.projected_area {
            Some(area) => checked::<StrictlyPositive>("projected area", area.get::<meter>())?,
            None => diameter / 1000.0,
        };
        let heat_capacity =
            checked::<StrictlyPositive>("heat capacity", conductor.heat_capacity.value)?;

        let low_temperature = finite(
            "low reference temperature",
            conductor.low_reference.temperature.get::<degree_celsius>(),
        )?;
        let high_temperature = finite(
            "high reference temperature",
            conductor.high_reference.temperature.get::<degree_celsius>(),
        )?;
        if low_temperature == high_temperature {
            return Err(ParameterError::IdenticalReferenceTemperatures {
                temperature: low_temperature,
            });
        }
        let low_resistance = checked::<StrictlyPositive>(
            "low reference resistance",
            conductor.low_reference.resistance.value,
        )?;
        let high_resistance = checked::<StrictlyPositive>(
            "high reference resistance",
            conductor.high_reference.resistance.value,
        )?;

        let emissivity = checked::<UnitInterval>("emissivity", conductor.emissivity)?;
        let absorptivity = checked::<UnitInterval>("absorptivity", conductor.absorptivity)?;

        let ambient = finite(
            "ambient temperature",
            environment.ambient.get::<degree_celsius>(),
        )?;
        let air_density = checked::<StrictlyPositive>(
            "air density",
            environment.air_density.get::<kilogram_per_cubic_meter>(),
        )?;
        let elevation = checked::<NonNegative>("elevation", environment.elevation.get::<meter>())?;

        finite("sun altitude", environment.solar.sun_altitude.value)?;
        finite("sun azimuth", environment.solar.sun_azimuth.value)?;
        finite("line azimuth", environment.solar.line_azimuth.value)?;

        let solar = SolarGain::new(&environment.solar, elevation);
        let solar_heating =
            absorptivity * solar.effective_flux * solar.incidence.sin() * projected_area;

        Ok(Self {
            diameter,
            projected_area,
            heat_capacity,
            low_temperature,
            low_resistance,
            high_temperature,
            high_resistance,
            emissivity,
            ambient,
            air_density,
            solar,
            solar_heating,
        })
    }

    /// Conductor diameter in mm.
    #[must_use]
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Projected area per unit length in m²/m.
    #[must_use]
    pub fn projected_area(&self) -> f64 {
        self.projected_area
    }

    /// Heat capacity per unit length, `mCp`, in J/m·°C.
    #[must_use]
    pub fn heat_capacity(&self) -> f64 {
        self.heat_capacity
    }

    /// Ambient temperature in °C.
    #[must_use]
    pub fn ambient(&self) -> f64 {
        self.ambient
    }

    /// Solar quantities derived from the sun position.
    #[must_use]
    pub fn solar(&self) -> &SolarGain {
        &self.solar
    }

    /// Solar heat gain `q_s` in W/m.
    #[must_use]
    pub fn solar_heating(&self) -> f64 {
        self.solar_heating
    }
}

/// Checks `value` against `C`, also rejecting infinities.
fn checked<C: Constraint<f64>>(name: &'static str, value: f64) -> Result<f64, ParameterError> {
    let value = Constrained::<f64, C>::new(value)
        .map_err(|source| ParameterError::Invalid { name, source })?
        .into_inner();
    finite(name, value)
}

fn finite(name: &'static str, value: f64) -> Result<f64, ParameterError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParameterError::NonFinite { name, value })
    }
}
