use thiserror::Error;

/// Configuration for the bisection solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Maximum number of midpoint evaluations before giving up.
    pub max_iters: usize,
    /// Converged once `|residual| <= residual_tol`.
    pub residual_tol: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            residual_tol: 1e-9,
        }
    }
}

/// Errors from [`Config::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("residual_tol must be finite and non-negative, got {0}")]
    ResidualTol(f64),
}

impl Config {
    /// Validates that the residual tolerance is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ResidualTol`] for a negative or non-finite tolerance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.residual_tol.is_finite() && self.residual_tol >= 0.0 {
            Ok(())
        } else {
            Err(ConfigError::ResidualTol(self.residual_tol))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_tolerance() {
        for tol in [-0.01, f64::NAN, f64::INFINITY] {
            let config = Config {
                residual_tol: tol,
                ..Config::default()
            };
            assert!(config.validate().is_err());
        }
    }
}
