//! Display sinks.
//!
//! Sinks consume what the engine publishes after every state change:
//! snapshots, the history list, and plain-text log lines. They only ever
//! see read-only data; rendering technology is the sink's business.

use crate::models::HistoryEntry;

use super::state::Snapshot;

/// Consumer of engine output.
pub trait DisplaySink {
    /// Called after every state mutation.
    fn on_snapshot(&mut self, snapshot: &Snapshot);

    /// Called when a run completes or the history is cleared.
    fn on_history(&mut self, history: &[HistoryEntry]) {
        let _ = history;
    }

    /// Append-only event log. Wording is presentation detail.
    fn on_log(&mut self, line: &str) {
        let _ = line;
    }
}

impl<S: DisplaySink + ?Sized> DisplaySink for Box<S> {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        (**self).on_snapshot(snapshot);
    }

    fn on_history(&mut self, history: &[HistoryEntry]) {
        (**self).on_history(history);
    }

    fn on_log(&mut self, line: &str) {
        (**self).on_log(line);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DisplaySink for NullSink {
    fn on_snapshot(&mut self, _snapshot: &Snapshot) {}
}

/// Collects everything it receives, for tests and inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    /// Snapshots in emission order.
    pub snapshots: Vec<Snapshot>,
    /// Most recent history list received.
    pub history: Vec<HistoryEntry>,
    /// Number of history notifications.
    pub history_updates: usize,
    /// Log lines in emission order.
    pub log: Vec<String>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent snapshot.
    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }
}

impl DisplaySink for RecordingSink {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.snapshots.push(*snapshot);
    }

    fn on_history(&mut self, history: &[HistoryEntry]) {
        self.history = history.to_vec();
        self.history_updates += 1;
    }

    fn on_log(&mut self, line: &str) {
        self.log.push(line.to_string());
    }
}

/// Forwards sink traffic to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DisplaySink for TracingSink {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        tracing::debug!(
            phase = ?snapshot.phase,
            algorithm = %snapshot.algorithm,
            head = snapshot.head,
            direction = %snapshot.direction,
            wave = snapshot.wave.get(),
            processed = snapshot.processed,
            pending = snapshot.pending,
            total_tracks = snapshot.total_tracks,
            "snapshot"
        );
    }

    fn on_history(&mut self, history: &[HistoryEntry]) {
        tracing::info!(runs = history.len(), "history_updated");
    }

    fn on_log(&mut self, line: &str) {
        tracing::info!(target: "disk_sched::log", "{line}");
    }
}
