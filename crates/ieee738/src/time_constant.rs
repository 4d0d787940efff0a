use thiserror::Error;

use crate::{conductor::ConductorParameters, heat_balance::HeatBalanceError, transient::Trajectory};

/// Errors from [`estimate_time_constant`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TimeConstantError {
    #[error("trajectory is empty")]
    EmptyTrajectory,

    #[error("fault and steady currents have equal magnitude ({0} A)")]
    EqualCurrents(f64),

    #[error(transparent)]
    HeatBalance(#[from] HeatBalanceError),
}

/// Estimates the thermal time constant of the conductor (s).
///
/// ```text
/// tau = (Tc_final - Tc_ss) * mCp / (R(Tc_final) * (I_f² - I_ss²))
/// ```
///
/// `Tc_ss` is the first sample of the trajectory. The estimate is only
/// meaningful once the trajectory has settled by its final sample.
///
/// # Errors
///
/// Fails for an empty trajectory, equal current magnitudes, or a final
/// temperature at which the heat balance cannot be evaluated.
pub fn estimate_time_constant(
    trajectory: &Trajectory,
    params: &ConductorParameters,
    steady_current: f64,
    fault_current: f64,
) -> Result<f64, TimeConstantError> {
    let (Some(&initial), Some(&last)) = (
        trajectory.temperatures.first(),
        trajectory.temperatures.last(),
    ) else {
        return Err(TimeConstantError::EmptyTrajectory);
    };

    let current_swing = fault_current.powi(2) - steady_current.powi(2);
    if current_swing == 0.0 {
        return Err(TimeConstantError::EqualCurrents(fault_current.abs()));
    }

    let resistance = params.heat_terms(last)?.resistance;
    Ok((last - initial) * params.heat_capacity() / (resistance * current_swing))
}
