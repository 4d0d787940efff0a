//! Steady-state heat balance of a conductor at a given temperature.
//!
//! ```text
//! R(Tc) * I² + q_s = q_cn(Tc) + q_r(Tc)
//! ```
//!
//! Everything here is per metre of conductor. The same terms drive both the
//! equilibrium search and the transient rate of change.

use thiserror::Error;

use crate::conductor::ConductorParameters;

/// Heat-balance terms evaluated at one conductor temperature, in W/m (Ω/m for
/// the resistance).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatTerms {
    pub temperature: f64,
    pub resistance: f64,
    /// Natural-convection loss, `q_cn`.
    pub convection: f64,
    /// Radiative loss, `q_r`.
    pub radiation: f64,
    /// Solar gain, `q_s`.
    pub solar: f64,
}

/// Errors from evaluating the heat balance.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum HeatBalanceError {
    #[error("conductor temperature must be finite, got {0}")]
    NonFiniteTemperature(f64),

    #[error("resistance extrapolated to {resistance} Ω/m at {temperature} °C")]
    NonPositiveResistance { temperature: f64, resistance: f64 },
}

impl HeatTerms {
    /// Heat lost to the surroundings net of solar gain, `q_cn + q_r - q_s`.
    #[must_use]
    pub fn net_loss(&self) -> f64 {
        self.convection + self.radiation - self.solar
    }

    /// Current that holds the conductor at this temperature.
    ///
    /// Below the temperature where losses balance solar gain the radicand is
    /// negative and no current can hold the conductor there; the result is
    /// zero, which is the real part of the complex root.
    #[must_use]
    pub fn balancing_current(&self) -> f64 {
        let radicand = self.net_loss() / self.resistance;
        if radicand > 0.0 { radicand.sqrt() } else { 0.0 }
    }

    /// Net heating in W/m when `current` flows, `R * I² + q_s - q_cn - q_r`.
    #[must_use]
    pub fn net_heating(&self, current: f64) -> f64 {
        self.resistance * current.powi(2) - self.net_loss()
    }
}

impl ConductorParameters {
    /// Resistance per metre at `temperature`, linear through both references.
    ///
    /// Outside the reference range this is an extrapolation.
    #[must_use]
    pub fn resistance(&self, temperature: f64) -> f64 {
        let slope = (self.high_resistance - self.low_resistance)
            / (self.high_temperature - self.low_temperature);
        self.low_resistance + slope * (temperature - self.low_temperature)
    }

    /// Natural-convection loss in still air.
    ///
    /// The 1.25 power law is applied to the magnitude of `Tc - Ta` with its
    /// sign kept, so a conductor below ambient gains heat.
    #[must_use]
    pub fn convection(&self, temperature: f64) -> f64 {
        let rise = temperature - self.ambient;
        0.0205
            * self.air_density.sqrt()
            * self.diameter.powf(0.75)
            * rise.signum()
            * rise.abs().powf(1.25)
    }

    /// Radiative loss to the surroundings.
    #[must_use]
    pub fn radiation(&self, temperature: f64) -> f64 {
        let conductor = ((temperature + 273.0) / 100.0).powi(4);
        let ambient = ((self.ambient + 273.0) / 100.0).powi(4);
        0.0178 * self.diameter * self.emissivity * (conductor - ambient)
    }

    /// Evaluates every heat-balance term at `temperature` (°C).
    ///
    /// # Errors
    ///
    /// Fails for a non-finite temperature or one so low that the extrapolated
    /// resistance is no longer positive.
    pub fn heat_terms(&self, temperature: f64) -> Result<HeatTerms, HeatBalanceError> {
        if !temperature.is_finite() {
            return Err(HeatBalanceError::NonFiniteTemperature(temperature));
        }

        let resistance = self.resistance(temperature);
        if resistance <= 0.0 {
            return Err(HeatBalanceError::NonPositiveResistance {
                temperature,
                resistance,
            });
        }

        Ok(HeatTerms {
            temperature,
            resistance,
            convection: self.convection(temperature),
            radiation: self.radiation(temperature),
            solar: self.solar_heating,
        })
    }

    /// Current that holds the conductor at `temperature` in steady state.
    ///
    /// # Errors
    ///
    /// See [`ConductorParameters::heat_terms`].
    pub fn balancing_current(&self, temperature: f64) -> Result<f64, HeatBalanceError> {
        self.heat_terms(temperature)
            .map(|terms| terms.balancing_current())
    }
}
