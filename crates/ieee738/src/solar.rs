use uom::si::{angle::degree, f64::Angle};

/// Sun position relative to the line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarConfig {
    /// Altitude of the sun above the horizon, `H_c`.
    pub sun_altitude: Angle,
    /// Azimuth of the sun, `Z_c`.
    pub sun_azimuth: Angle,
    /// Azimuth of the line, `Z_l` (90° or 270° for an east-west line).
    pub line_azimuth: Angle,
}

/// Solar heating quantities derived once from the sun position and elevation.
///
/// These never change after construction; the per-metre solar gain of a
/// conductor is `alpha * effective_flux * sin(incidence) * area`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarGain {
    /// Total heat flux at sea level, `Q_s` (W/m²).
    pub total_flux: f64,
    /// Elevation correction factor, `K_solar`.
    pub elevation_factor: f64,
    /// Flux corrected for elevation, `Q_se = K_solar * Q_s` (W/m²).
    pub effective_flux: f64,
    /// Effective angle of incidence of the sun's rays, `theta` (radians).
    pub incidence: f64,
}

/// Clear-atmosphere polynomial coefficients for `Q_s(H_c)`, lowest order first.
const CLEAR_SKY_FLUX: [f64; 7] = [
    -42.2391,
    63.8044,
    -1.9220,
    3.46921e-2,
    -3.61118e-4,
    1.94318e-6,
    -4.07608e-9,
];

impl SolarGain {
    /// Derives the solar quantities for a sun position and line elevation (m).
    ///
    /// The polynomial is negative close to the horizon; the flux is floored at
    /// zero so a low or set sun never cools the conductor.
    ///
    /// The incidence angle is computed from the configured angles in radians.
    /// Worksheets that feed degree values straight into the cosines get a
    /// smaller `sin θ` (0.9565 instead of 0.9803 for the reference sun and
    /// line), so their solar heating and steady-state temperatures come out
    /// slightly lower than the values computed here.
    #[must_use]
    pub fn new(config: &SolarConfig, elevation: f64) -> Self {
        let altitude = config.sun_altitude.get::<degree>();

        let total_flux = CLEAR_SKY_FLUX
            .iter()
            .rev()
            .fold(0.0, |acc, c| acc * altitude + c)
            .max(0.0);
        let elevation_factor = 1.0 + 1.148e-4 * elevation - 1.108e-8 * elevation.powi(2);

        let relative_azimuth = config.sun_azimuth - config.line_azimuth;
        let incidence = (config.sun_altitude.value.cos() * relative_azimuth.value.cos()).acos();

        Self {
            total_flux,
            elevation_factor,
            effective_flux: elevation_factor * total_flux,
            incidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn sun(altitude: f64, azimuth: f64, line: f64) -> SolarConfig {
        SolarConfig {
            sun_altitude: Angle::new::<degree>(altitude),
            sun_azimuth: Angle::new::<degree>(azimuth),
            line_azimuth: Angle::new::<degree>(line),
        }
    }

    #[test]
    fn reference_sun_position() {
        let gain = SolarGain::new(&sun(72.5, 139.0, 90.0), 25.0);

        assert_relative_eq!(gain.total_flux, 1024.780_891, max_relative = 1e-8);
        assert_relative_eq!(gain.elevation_factor, 1.002_863_075, max_relative = 1e-9);
        assert_relative_eq!(gain.effective_flux, 1027.714_916, max_relative = 1e-8);
        assert_relative_eq!(gain.incidence.to_degrees(), 78.622_010, max_relative = 1e-7);
        // Angles are read in radians, not fed to the cosines as raw degrees.
        assert_relative_eq!(gain.incidence.sin(), 0.980_347, epsilon = 1e-6);
        let raw_degrees = (72.5_f64.cos() * 49.0_f64.cos()).acos().sin();
        assert_relative_eq!(raw_degrees, 0.956_499, epsilon = 1e-6);
    }

    #[test]
    fn sea_level_has_no_correction() {
        let gain = SolarGain::new(&sun(60.0, 180.0, 90.0), 0.0);
        assert_relative_eq!(gain.elevation_factor, 1.0);
        assert_relative_eq!(gain.effective_flux, gain.total_flux);
    }

    #[test]
    fn sun_at_horizon_gives_no_flux() {
        let gain = SolarGain::new(&sun(0.0, 139.0, 90.0), 25.0);
        assert_relative_eq!(gain.total_flux, 0.0);
        assert_relative_eq!(gain.effective_flux, 0.0);
    }

    #[test]
    fn sun_square_to_the_line_hits_at_right_angles() {
        // Sun on the horizon due south of an east-west line.
        let gain = SolarGain::new(&sun(0.0, 180.0, 90.0), 0.0);
        assert_relative_eq!(gain.incidence.to_degrees(), 90.0, epsilon = 1e-9);
    }
}
