//! Per-step results and cross-run history.
//!
//! A run appends one [`StepResult`] per served request. When a run
//! completes, a [`HistoryEntry`] summarizing it is appended to the
//! session [`History`], which survives resets and is only emptied by an
//! explicit clear.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use crate::policy::Algorithm;

/// Outcome of serving one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    /// Served request id.
    pub request_id: u32,
    /// Cylinders travelled to reach the request.
    pub tracks_moved: u32,
    /// Whether this move reversed the head's direction.
    pub direction_changed: bool,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Policy used for the run.
    pub algorithm: Algorithm,
    /// Total cylinders travelled.
    pub total_tracks: u64,
    /// Number of head reversals.
    pub total_direction_changes: u32,
    /// Wall-clock completion time.
    pub timestamp: SystemTime,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time.
    pub fn now(algorithm: Algorithm, total_tracks: u64, total_direction_changes: u32) -> Self {
        Self {
            algorithm,
            total_tracks,
            total_direction_changes,
            timestamp: SystemTime::now(),
        }
    }
}

/// Append-only list of completed runs for the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a completed run.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in completion order.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Number of recorded runs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no run has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The cheapest run: fewest tracks, then fewest reversals, then earliest.
    pub fn best(&self) -> Option<&HistoryEntry> {
        // min_by_key keeps the first of equal keys
        self.entries
            .iter()
            .min_by_key(|e| (e.total_tracks, e.total_direction_changes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_push_and_clear() {
        let mut history = History::new();
        history.push(HistoryEntry::now(Algorithm::Fcfs, 300, 12));
        history.push(HistoryEntry::now(Algorithm::Sstf, 90, 4));
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().map(|e| e.algorithm), Some(Algorithm::Sstf));

        history.clear();
        assert!(history.is_empty());
        assert!(history.best().is_none());
    }

    #[test]
    fn test_history_best() {
        let mut history = History::new();
        history.push(HistoryEntry::now(Algorithm::Fcfs, 300, 12));
        history.push(HistoryEntry::now(Algorithm::Scan, 90, 3));
        history.push(HistoryEntry::now(Algorithm::Sstf, 90, 4));
        history.push(HistoryEntry::now(Algorithm::CScan, 90, 3));

        let best = history.best().map(|e| e.algorithm);
        assert_eq!(best, Some(Algorithm::Scan));
    }

    #[test]
    fn test_step_result_serde() {
        let step = StepResult {
            request_id: 4,
            tracks_moved: 11,
            direction_changed: true,
        };
        let json = serde_json::to_string(&step).unwrap();
        let back: StepResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, step);
    }
}
