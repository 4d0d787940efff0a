//! Fault followed by automatic reclosure of the line breaker.
//!
//! A scheme is a list of timed segments, each either carrying the load
//! current, carrying the fault current, or open. Anything after the last
//! segment is treated as lockout (open). Currents are sampled on a uniform
//! grid and the samples from index 1 onward drive the transient.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::waveform::{CurrentWaveform, WaveformError};

/// What the line carries during a [`Segment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakerState {
    /// Closed, carrying the steady-state load current.
    Load,
    /// Closed onto the fault.
    Fault,
    /// Open, no current.
    Open,
}

/// A time window `[start, end)` in seconds with a fixed breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub state: BreakerState,
}

impl Segment {
    #[must_use]
    pub fn new(start: f64, end: f64, state: BreakerState) -> Self {
        Self { start, end, state }
    }
}

/// Errors from validating a [`ReclosureScheme`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ScenarioError {
    #[error("{name} must be finite and non-negative, got {value} A")]
    InvalidCurrent { name: &'static str, value: f64 },

    #[error("samples per second must be positive")]
    ZeroSampleRate,

    #[error("total time must cover at least one sample, got {0} s")]
    InvalidDuration(f64),

    #[error("segment {index} spans [{start}, {end}) s, which is not a valid window")]
    InvalidSegment { index: usize, start: f64, end: f64 },

    #[error("segment {index} starts before the previous segment ends")]
    Overlap { index: usize },

    #[error(transparent)]
    Waveform(#[from] WaveformError),
}

/// Current waveform for a fault cleared and reclosed on a schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct ReclosureScheme {
    /// Load current before the fault, `I_ss` (A).
    pub steady_current: f64,
    /// Fault current, `I_f` (A).
    pub fault_current: f64,
    pub samples_per_second: usize,
    /// Simulated horizon (s).
    pub total_time: f64,
    pub segments: Vec<Segment>,
}

impl ReclosureScheme {
    /// Two-shot reclosure: 0.1 s fault, 0.3 s open, 0.1 s reclose onto the
    /// fault, 1.0 s open, a final 0.1 s reclose, then lockout.
    ///
    /// Sampled at 50 samples per second over two hours.
    #[must_use]
    pub fn two_shot(steady_current: f64, fault_current: f64) -> Self {
        Self {
            steady_current,
            fault_current,
            samples_per_second: 50,
            total_time: 7200.0,
            segments: Self::two_shot_segments(),
        }
    }

    /// The segment list used by [`ReclosureScheme::two_shot`].
    #[must_use]
    pub fn two_shot_segments() -> Vec<Segment> {
        use BreakerState::{Fault, Load, Open};
        vec![
            Segment::new(0.0, 0.1, Load),
            Segment::new(0.1, 0.2, Fault),
            Segment::new(0.2, 0.5, Open),
            Segment::new(0.5, 0.6, Fault),
            Segment::new(0.6, 1.6, Open),
            Segment::new(1.6, 1.7, Fault),
        ]
    }

    /// Integration time step, `1 / samples_per_second` (s).
    #[must_use]
    pub fn time_step(&self) -> f64 {
        1.0 / self.samples_per_second as f64
    }

    /// Number of integration steps over the horizon.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.sample_index(self.total_time)
    }

    /// Checks currents, sample rate, horizon and segment ordering.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        for (name, value) in [
            ("steady current", self.steady_current),
            ("fault current", self.fault_current),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ScenarioError::InvalidCurrent { name, value });
            }
        }
        if self.samples_per_second == 0 {
            return Err(ScenarioError::ZeroSampleRate);
        }
        if !(self.total_time.is_finite() && self.steps() > 0) {
            return Err(ScenarioError::InvalidDuration(self.total_time));
        }

        let mut previous_end = 0.0;
        for (index, segment) in self.segments.iter().enumerate() {
            let Segment { start, end, .. } = *segment;
            if !(start.is_finite() && end.is_finite() && start >= 0.0 && end > start) {
                return Err(ScenarioError::InvalidSegment { index, start, end });
            }
            if start < previous_end {
                return Err(ScenarioError::Overlap { index });
            }
            previous_end = end;
        }
        Ok(())
    }

    /// Current samples `I[0..=N]` on the uniform grid.
    ///
    /// Sample `i` sits at `i / samples_per_second` seconds and takes the
    /// current of the segment covering that instant.
    ///
    /// # Errors
    ///
    /// See [`ReclosureScheme::validate`].
    pub fn samples(&self) -> Result<Vec<f64>, ScenarioError> {
        self.validate()?;

        let len = self.steps() + 1;
        let mut samples = vec![0.0; len];
        for segment in &self.segments {
            let from = self.sample_index(segment.start).min(len);
            let to = self.sample_index(segment.end).min(len);
            samples[from..to].fill(self.current(segment.state));
        }
        Ok(samples)
    }

    /// The driving waveform, `I[1..=N]`.
    ///
    /// # Errors
    ///
    /// See [`ReclosureScheme::validate`].
    pub fn waveform(&self) -> Result<CurrentWaveform, ScenarioError> {
        let mut samples = self.samples()?;
        samples.remove(0);
        Ok(CurrentWaveform::new(samples)?)
    }

    fn current(&self, state: BreakerState) -> f64 {
        match state {
            BreakerState::Load => self.steady_current,
            BreakerState::Fault => self.fault_current,
            BreakerState::Open => 0.0,
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn sample_index(&self, time: f64) -> usize {
        (time * self.samples_per_second as f64).round().max(0.0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_two_shot() -> ReclosureScheme {
        ReclosureScheme {
            total_time: 2.0,
            ..ReclosureScheme::two_shot(500.0, 20_000.0)
        }
    }

    #[test]
    fn reference_grid() {
        let scheme = ReclosureScheme::two_shot(500.0, 20_000.0);

        assert_eq!(scheme.steps(), 360_000);
        assert!((scheme.time_step() - 0.02).abs() < 1e-15);
        assert_eq!(scheme.waveform().unwrap().len(), 360_000);
    }

    #[test]
    fn samples_follow_segments() {
        let samples = short_two_shot().samples().unwrap();

        assert_eq!(samples.len(), 101);
        assert!(samples[0..5].iter().all(|&i| i == 500.0));
        assert!(samples[5..10].iter().all(|&i| i == 20_000.0));
        assert!(samples[10..25].iter().all(|&i| i == 0.0));
        assert!(samples[25..30].iter().all(|&i| i == 20_000.0));
        assert!(samples[30..80].iter().all(|&i| i == 0.0));
        assert!(samples[80..85].iter().all(|&i| i == 20_000.0));
        assert!(samples[85..].iter().all(|&i| i == 0.0));
    }

    #[test]
    fn waveform_drops_the_first_sample() {
        let scheme = short_two_shot();
        let samples = scheme.samples().unwrap();
        let waveform = scheme.waveform().unwrap();

        assert_eq!(waveform.len(), samples.len() - 1);
        assert_eq!(waveform.samples(), &samples[1..]);
        // The fault starts at sample 5, which drives the interval 4 -> 5.
        assert_eq!(waveform.interval_current(3), 500.0);
        assert_eq!(waveform.interval_current(4), 20_000.0);
    }

    #[test]
    fn horizon_shorter_than_segments_truncates() {
        let scheme = ReclosureScheme {
            total_time: 0.15,
            ..ReclosureScheme::two_shot(500.0, 20_000.0)
        };
        let samples = scheme.samples().unwrap();

        assert_eq!(samples.len(), 9);
        assert_eq!(samples[8], 20_000.0);
    }

    #[test]
    fn rejects_bad_schemes() {
        let mut scheme = short_two_shot();
        scheme.samples_per_second = 0;
        assert_eq!(scheme.validate(), Err(ScenarioError::ZeroSampleRate));

        let mut scheme = short_two_shot();
        scheme.fault_current = -5.0;
        assert!(matches!(
            scheme.validate(),
            Err(ScenarioError::InvalidCurrent {
                name: "fault current",
                ..
            })
        ));

        let mut scheme = short_two_shot();
        scheme.total_time = 0.001;
        assert_eq!(scheme.validate(), Err(ScenarioError::InvalidDuration(0.001)));

        let mut scheme = short_two_shot();
        scheme.segments[2].end = scheme.segments[2].start;
        assert!(matches!(
            scheme.validate(),
            Err(ScenarioError::InvalidSegment { index: 2, .. })
        ));

        let mut scheme = short_two_shot();
        scheme.segments[3].start = 0.3;
        assert_eq!(scheme.validate(), Err(ScenarioError::Overlap { index: 3 }));
    }
}
