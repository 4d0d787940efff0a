//! TOML scenario files.
//!
//! Every field has a default taken from the reference case (a 22.8 mm ACSR
//! conductor carrying 500 A, faulted at 20 kA with two-shot reclosure), so a
//! file only needs the values that differ. Numbers are plain engineering
//! units named in the key; they become `uom` quantities on conversion.
//!
//! ```toml
//! [conductor]
//! diameter_mm = 28.1
//!
//! [scenario]
//! fault_current_a = 31500.0
//! ```

use std::{fs, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::{
    angle::degree,
    f64::{Angle, Length, MassDensity, ThermodynamicTemperature},
    length::{meter, millimeter},
    mass_density::kilogram_per_cubic_meter,
    thermodynamic_temperature::degree_celsius,
};

use crate::{
    conductor::{
        ConductorConfig, ConductorParameters, EnvironmentConfig, ParameterError,
        ResistanceReference,
    },
    equilibrium::EquilibriumOptions,
    scenario::{ReclosureScheme, ScenarioError, Segment},
    solar::SolarConfig,
    units::{joule_per_meter_kelvin, ohm_per_meter},
};

/// Errors from loading or converting a scenario file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario file")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize scenario")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid conductor or environment")]
    Parameters(#[from] ParameterError),

    #[error("invalid reclosure scheme")]
    Scenario(#[from] ScenarioError),
}

/// A complete scenario: conductor, surroundings, fault sequence and run
/// settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioFile {
    pub conductor: ConductorSection,
    pub environment: EnvironmentSection,
    pub solar: SolarSection,
    pub scenario: ScenarioSection,
    pub simulation: SimulationSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConductorSection {
    pub diameter_mm: f64,
    /// Projected area per unit length. Omitted means `diameter / 1000`.
    pub projected_area_m2_per_m: Option<f64>,
    /// Mass per metre times specific heat.
    pub heat_capacity_j_per_m_c: f64,
    pub resistance_low_ohm_per_m: f64,
    pub temperature_low_c: f64,
    pub resistance_high_ohm_per_m: f64,
    pub temperature_high_c: f64,
    pub emissivity: f64,
    pub absorptivity: f64,
}

impl Default for ConductorSection {
    fn default() -> Self {
        Self {
            diameter_mm: 22.8,
            projected_area_m2_per_m: None,
            // 1.0 kg/m of aluminium-clad steel at 534 J/kg·°C.
            heat_capacity_j_per_m_c: 534.0,
            resistance_low_ohm_per_m: 7.283e-5,
            temperature_low_c: 25.0,
            resistance_high_ohm_per_m: 8.688e-5,
            temperature_high_c: 75.0,
            emissivity: 0.5,
            absorptivity: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentSection {
    pub ambient_c: f64,
    pub air_density_kg_per_m3: f64,
    pub elevation_m: f64,
}

impl Default for EnvironmentSection {
    fn default() -> Self {
        Self {
            ambient_c: 25.0,
            air_density_kg_per_m3: 1.029,
            elevation_m: 25.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarSection {
    pub sun_altitude_deg: f64,
    pub sun_azimuth_deg: f64,
    /// 90 or 270 for an east-west line.
    pub line_azimuth_deg: f64,
}

impl Default for SolarSection {
    fn default() -> Self {
        Self {
            sun_altitude_deg: 72.5,
            sun_azimuth_deg: 139.0,
            line_azimuth_deg: 90.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioSection {
    pub steady_current_a: f64,
    pub fault_current_a: f64,
    /// Breaker schedule; lockout follows the last segment.
    pub segments: Vec<Segment>,
}

impl Default for ScenarioSection {
    fn default() -> Self {
        Self {
            steady_current_a: 500.0,
            fault_current_a: 20_000.0,
            segments: ReclosureScheme::two_shot_segments(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSection {
    pub samples_per_second: usize,
    pub total_time_s: f64,
    /// 660 °C for aluminium.
    pub melt_point_c: f64,
    pub equilibrium_tolerance_a: f64,
    pub max_iterations: usize,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            samples_per_second: 50,
            total_time_s: 7200.0,
            melt_point_c: 660.0,
            equilibrium_tolerance_a: 0.01,
            max_iterations: 100,
        }
    }
}

impl FromStr for ScenarioFile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

impl ScenarioFile {
    /// Reads and parses a scenario file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a valid scenario.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        contents.parse()
    }

    /// Renders the scenario as TOML.
    ///
    /// # Errors
    ///
    /// Fails only if a value cannot be represented in TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn conductor_config(&self) -> ConductorConfig {
        let c = &self.conductor;
        ConductorConfig {
            diameter: Length::new::<millimeter>(c.diameter_mm),
            projected_area: c.projected_area_m2_per_m.map(Length::new::<meter>),
            heat_capacity: joule_per_meter_kelvin(c.heat_capacity_j_per_m_c),
            low_reference: ResistanceReference {
                temperature: ThermodynamicTemperature::new::<degree_celsius>(c.temperature_low_c),
                resistance: ohm_per_meter(c.resistance_low_ohm_per_m),
            },
            high_reference: ResistanceReference {
                temperature: ThermodynamicTemperature::new::<degree_celsius>(c.temperature_high_c),
                resistance: ohm_per_meter(c.resistance_high_ohm_per_m),
            },
            emissivity: c.emissivity,
            absorptivity: c.absorptivity,
        }
    }

    #[must_use]
    pub fn environment_config(&self) -> EnvironmentConfig {
        let e = &self.environment;
        EnvironmentConfig {
            ambient: ThermodynamicTemperature::new::<degree_celsius>(e.ambient_c),
            air_density: MassDensity::new::<kilogram_per_cubic_meter>(e.air_density_kg_per_m3),
            elevation: Length::new::<meter>(e.elevation_m),
            solar: SolarConfig {
                sun_altitude: Angle::new::<degree>(self.solar.sun_altitude_deg),
                sun_azimuth: Angle::new::<degree>(self.solar.sun_azimuth_deg),
                line_azimuth: Angle::new::<degree>(self.solar.line_azimuth_deg),
            },
        }
    }

    /// Validated conductor parameters.
    ///
    /// # Errors
    ///
    /// See [`ConductorParameters::new`].
    pub fn parameters(&self) -> Result<ConductorParameters, ConfigError> {
        Ok(ConductorParameters::new(
            &self.conductor_config(),
            &self.environment_config(),
        )?)
    }

    /// The fault and reclosure sequence, validated.
    ///
    /// # Errors
    ///
    /// See [`ReclosureScheme::validate`].
    pub fn reclosure_scheme(&self) -> Result<ReclosureScheme, ConfigError> {
        let scheme = ReclosureScheme {
            steady_current: self.scenario.steady_current_a,
            fault_current: self.scenario.fault_current_a,
            samples_per_second: self.simulation.samples_per_second,
            total_time: self.simulation.total_time_s,
            segments: self.scenario.segments.clone(),
        };
        scheme.validate()?;
        Ok(scheme)
    }

    #[must_use]
    pub fn equilibrium_options(&self) -> EquilibriumOptions {
        EquilibriumOptions {
            tolerance: self.simulation.equilibrium_tolerance_a,
            max_iterations: self.simulation.max_iterations,
            ceiling: None,
        }
    }
}
