//! Run state and read-only snapshots.

use serde::Serialize;

use crate::models::{Direction, PendingQueue, RequestSet, StepResult, WaveIndex};
use crate::policy::Algorithm;

/// Lifecycle phase of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Phase {
    /// No run in progress.
    #[default]
    Idle,
    /// Steps are being scheduled.
    Running,
    /// Stepping suspended until resume.
    Paused,
    /// Every request has been served.
    Completed,
}

impl Phase {
    /// Whether a run is in progress (running or paused).
    pub fn is_active(self) -> bool {
        matches!(self, Phase::Running | Phase::Paused)
    }
}

/// Mutable state of a single run. Owned and mutated only by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    /// Cylinder under the head.
    pub head: u32,
    /// Direction of the last move.
    pub direction: Direction,
    /// Released, unserved requests.
    pub pending: PendingQueue,
    /// Requests served so far.
    pub processed: usize,
    /// Cylinders travelled so far.
    pub total_tracks: u64,
    /// Head reversals so far.
    pub direction_changes: u32,
    /// Most recently released wave.
    pub wave: WaveIndex,
    /// Lifecycle phase.
    pub phase: Phase,
}

impl RunState {
    /// State at the start of a run: head at `initial_head`, wave 1 pending.
    pub fn initial(requests: &RequestSet, initial_head: u32) -> Self {
        let mut pending = PendingQueue::new();
        pending.admit(requests.wave(WaveIndex::FIRST));
        Self {
            head: initial_head,
            direction: Direction::None,
            pending,
            processed: 0,
            total_tracks: 0,
            direction_changes: 0,
            wave: WaveIndex::FIRST,
            phase: Phase::Idle,
        }
    }

    /// Whether steps are currently being scheduled.
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Whether the run is suspended.
    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }
}

/// Read-only projection of the engine handed to display sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Lifecycle phase.
    pub phase: Phase,
    /// Selected algorithm.
    pub algorithm: Algorithm,
    /// Cylinder under the head.
    pub head: u32,
    /// Direction of the last move.
    pub direction: Direction,
    /// Most recently released wave.
    pub wave: WaveIndex,
    /// Requests served so far.
    pub processed: usize,
    /// Released, unserved requests.
    pub pending: usize,
    /// Cylinders travelled so far.
    pub total_tracks: u64,
    /// Head reversals so far.
    pub direction_changes: u32,
    /// Result of the most recent step, if any.
    pub latest: Option<StepResult>,
}

impl Snapshot {
    pub(crate) fn capture(state: &RunState, algorithm: Algorithm, latest: Option<StepResult>) -> Self {
        Self {
            phase: state.phase,
            algorithm,
            head: state.head,
            direction: state.direction,
            wave: state.wave,
            processed: state.processed,
            pending: state.pending.len(),
            total_tracks: state.total_tracks,
            direction_changes: state.direction_changes,
            latest,
        }
    }

    /// Progress through the run as a fraction in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        self.processed as f64 / crate::models::REQUEST_COUNT as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::REQUEST_COUNT;

    #[test]
    fn test_initial_state_is_idle() {
        let requests = RequestSet::generate(Some(2));
        let state = RunState::initial(&requests, 20);
        assert_eq!(state.phase, Phase::Idle);
        assert!(!state.is_running());
        assert!(!state.is_paused());
        assert_eq!(state.pending.len(), 10);
    }

    #[test]
    fn test_phase_flags() {
        let requests = RequestSet::generate(Some(2));
        let mut state = RunState::initial(&requests, 20);

        state.phase = Phase::Running;
        assert!(state.is_running() && !state.is_paused());
        assert!(state.phase.is_active());

        state.phase = Phase::Paused;
        assert!(state.is_paused() && !state.is_running());
        assert!(state.phase.is_active());

        state.phase = Phase::Completed;
        assert!(!state.phase.is_active());
    }

    #[test]
    fn test_snapshot_progress() {
        let requests = RequestSet::generate(Some(2));
        let mut state = RunState::initial(&requests, 20);
        state.processed = REQUEST_COUNT / 2;
        let snapshot = Snapshot::capture(&state, Algorithm::Scan, None);
        assert_eq!(snapshot.pending, 10);
        assert!((snapshot.progress() - 0.5).abs() < 1e-10);
    }
}
