use thiserror::Error;

/// RMS current magnitudes driving a transient, one sample per time step.
///
/// Sample `k` is the current flowing over the interval from step `k` to step
/// `k + 1`. A waveform of `N` samples therefore drives `N` integration steps.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWaveform {
    samples: Vec<f64>,
}

/// Errors from building a [`CurrentWaveform`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum WaveformError {
    #[error("waveform has no samples")]
    Empty,

    #[error("sample {index} must be finite and non-negative, got {value} A")]
    InvalidSample { index: usize, value: f64 },
}

impl CurrentWaveform {
    /// Wraps a list of RMS currents in amperes.
    ///
    /// # Errors
    ///
    /// Fails if `samples` is empty or any sample is negative or not finite.
    pub fn new(samples: Vec<f64>) -> Result<Self, WaveformError> {
        if samples.is_empty() {
            return Err(WaveformError::Empty);
        }
        if let Some((index, &value)) = samples
            .iter()
            .enumerate()
            .find(|(_, v)| !(v.is_finite() && **v >= 0.0))
        {
            return Err(WaveformError::InvalidSample { index, value });
        }
        Ok(Self { samples })
    }

    /// A waveform holding `current` for `steps` steps.
    ///
    /// # Errors
    ///
    /// See [`CurrentWaveform::new`].
    pub fn constant(current: f64, steps: usize) -> Result<Self, WaveformError> {
        Self::new(vec![current; steps])
    }

    /// Number of samples, which is also the number of integration steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; an empty waveform cannot be built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Current over the interval starting at `step`.
    ///
    /// Past the last interval the final sample is held.
    #[must_use]
    pub fn interval_current(&self, step: usize) -> f64 {
        let last = self.samples.len() - 1;
        self.samples[step.min(last)]
    }

    /// Largest sample.
    #[must_use]
    pub fn peak(&self) -> f64 {
        self.samples.iter().copied().fold(0.0, f64::max)
    }
}
