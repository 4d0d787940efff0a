use ampline_core::Snapshot;

/// Indicates how the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Completed all requested steps.
    Complete,
    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of an Euler integration.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    pub status: Status,
    /// Snapshots from the initial state through the last completed step.
    pub history: Vec<Snapshot<I, O>>,
    /// Number of integration steps completed.
    pub steps: usize,
}
