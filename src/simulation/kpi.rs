//! Run quality metrics (KPIs).
//!
//! Computes seek-cost indicators from the results log of a run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total tracks | Sum of seek distances |
//! | Mean seek | Total tracks / served requests |
//! | Max seek | Largest single seek |
//! | Direction changes | Head reversals |
//! | Zero seeks | Requests served without moving |
//!
//! # Reference
//! Teorey & Pinkerton (1972), "A Comparative Analysis of Disk Scheduling
//! Policies", §3: Performance Measures

use serde::Serialize;

use crate::models::StepResult;

/// Seek-cost indicators for a (possibly partial) run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunKpi {
    /// Requests served.
    pub processed: usize,
    /// Sum of seek distances (cylinders).
    pub total_tracks: u64,
    /// Mean seek distance per served request.
    pub mean_seek: f64,
    /// Largest single seek.
    pub max_seek: u32,
    /// Number of head reversals.
    pub direction_changes: u32,
    /// Requests served without moving the head.
    pub zero_seeks: usize,
}

impl RunKpi {
    /// Computes KPIs from a results log.
    pub fn calculate(results: &[StepResult]) -> Self {
        let mut total_tracks: u64 = 0;
        let mut max_seek: u32 = 0;
        let mut direction_changes: u32 = 0;
        let mut zero_seeks: usize = 0;

        for step in results {
            total_tracks += u64::from(step.tracks_moved);
            max_seek = max_seek.max(step.tracks_moved);
            if step.direction_changed {
                direction_changes += 1;
            }
            if step.tracks_moved == 0 {
                zero_seeks += 1;
            }
        }

        let mean_seek = if results.is_empty() {
            0.0
        } else {
            total_tracks as f64 / results.len() as f64
        };

        Self {
            processed: results.len(),
            total_tracks,
            mean_seek,
            max_seek,
            direction_changes,
            zero_seeks,
        }
    }

    /// Whether this run is cheaper than `other`: fewer tracks, then fewer
    /// reversals.
    pub fn is_better_than(&self, other: &RunKpi) -> bool {
        (self.total_tracks, self.direction_changes) < (other.total_tracks, other.direction_changes)
    }
}
