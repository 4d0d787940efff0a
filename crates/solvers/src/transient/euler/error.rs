use std::error::Error as StdError;

/// Errors that can occur during Euler integration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("model call failed at step {step}")]
    Model {
        step: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("problem error at step {step}")]
    Problem {
        step: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl Error {
    pub(crate) fn model<E: StdError + Send + Sync + 'static>(step: usize, err: E) -> Self {
        Self::Model {
            step,
            source: Box::new(err),
        }
    }

    pub(crate) fn problem<E: StdError + Send + Sync + 'static>(step: usize, err: E) -> Self {
        Self::Problem {
            step,
            source: Box::new(err),
        }
    }

    /// Returns the step at which the error occurred.
    #[must_use]
    pub fn step(&self) -> usize {
        match self {
            Self::Model { step, .. } | Self::Problem { step, .. } => *step,
        }
    }
}
