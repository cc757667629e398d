//! Step-driven disk-scheduling simulation engine.
//!
//! # State Machine
//!
//! ```text
//!            start              pause
//!   Idle ───────────▶ Running ◀──────▶ Paused
//!    ▲                  │       resume
//!    │ reset (any)      │ queue drained
//!    │                  ▼
//!    └────────────── Completed ──start──▶ Running
//! ```
//!
//! # Step
//!
//! 1. Release the next wave if its processed-count milestone was reached.
//! 2. Complete the run if nothing is pending.
//! 3. Ask the policy for the next request.
//! 4. Seek to it, accumulating tracks and counting reversals.
//! 5. Record the result, publish a snapshot, schedule the next step.
//!
//! Steps are never looped internally; each one schedules its successor on
//! the [`StepTimer`] and returns.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, trace};

use super::display::{DisplaySink, NullSink};
use super::kpi::RunKpi;
use super::state::{Phase, RunState, Snapshot};
use super::timer::{StepTicket, StepTimer};
use crate::config::{clamp_speed, SimulationConfig};
use crate::models::{
    History, HistoryEntry, Request, RequestSet, StepResult, WaveIndex, REQUEST_COUNT,
};
use crate::policy::{Algorithm, HeadContext, SchedulingPolicy};

/// Processed-count milestones at which waves 2 and 3 are released.
pub const WAVE_RELEASE_AT: [usize; 2] = [5, 15];

/// Disk-scheduling simulation engine.
///
/// Owns the request universe, the run state, the results log and the
/// session history. Display sinks receive snapshots after every mutation.
///
/// # Example
///
/// ```
/// use disk_sched::config::SimulationConfig;
/// use disk_sched::policy::Algorithm;
/// use disk_sched::simulation::SimulationEngine;
///
/// let config = SimulationConfig::deterministic(42).with_algorithm(Algorithm::Sstf);
/// let mut engine = SimulationEngine::new(config);
/// engine.start();
/// let entry = engine.run_to_completion().cloned().unwrap();
///
/// assert_eq!(engine.state().processed, 30);
/// assert_eq!(entry.algorithm, Algorithm::Sstf);
/// ```
pub struct SimulationEngine<S: DisplaySink = NullSink> {
    config: SimulationConfig,
    algorithm: Algorithm,
    policy: Arc<dyn SchedulingPolicy>,
    requests: RequestSet,
    state: RunState,
    results: Vec<StepResult>,
    history: History,
    timer: StepTimer,
    now: Duration,
    sink: S,
}

impl SimulationEngine<NullSink> {
    /// Creates an engine that publishes nowhere.
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_sink(config, NullSink)
    }
}

impl<S: DisplaySink> SimulationEngine<S> {
    /// Creates an idle engine with freshly generated requests.
    ///
    /// The config is normalized; requests are seeded from `config.seed`.
    pub fn with_sink(config: SimulationConfig, sink: S) -> Self {
        let config = config.normalized();
        let requests = RequestSet::generate(config.seed);
        let state = RunState::initial(&requests, config.initial_head);
        Self {
            algorithm: config.algorithm,
            policy: config.algorithm.policy(config.nstep_group_size),
            config,
            requests,
            state,
            results: Vec::new(),
            history: History::new(),
            timer: StepTimer::new(),
            now: Duration::ZERO,
            sink,
        }
    }

    /// Replaces the request universe (builder form of [`Self::load_requests`]).
    pub fn with_requests(mut self, requests: RequestSet) -> Self {
        self.load_requests(requests);
        self
    }

    // ======================== Control surface ========================

    /// Selects the policy for the next run. Ignored while a run is active.
    pub fn select_algorithm(&mut self, algorithm: Algorithm) {
        if self.state.phase.is_active() {
            debug!(%algorithm, phase = ?self.state.phase, "select_algorithm ignored");
            return;
        }
        self.algorithm = algorithm;
        self.config.algorithm = algorithm;
        self.policy = algorithm.policy(self.config.nstep_group_size);
        self.log(format!("Algorithm selected: {}", algorithm.long_name()));
        self.publish();
    }

    /// Generates a new request universe, resetting any run in progress.
    pub fn generate_requests(&mut self, seed: Option<u64>) {
        self.load_requests(RequestSet::generate(seed));
    }

    /// Installs a request universe, resetting any run in progress.
    pub fn load_requests(&mut self, requests: RequestSet) {
        self.requests = requests;
        self.log(format!(
            "New requests loaded ({REQUEST_COUNT} requests, {} waves)",
            WaveIndex::LAST
        ));
        self.reset();
    }

    /// Starts a run from `Idle` or `Completed` and performs the first step.
    ///
    /// No-op while a run is active.
    pub fn start(&mut self) {
        if self.state.phase.is_active() {
            debug!(phase = ?self.state.phase, "start ignored");
            return;
        }
        self.timer.cancel();
        self.state = RunState::initial(&self.requests, self.config.initial_head);
        self.state.phase = Phase::Running;
        self.results.clear();

        info!(
            algorithm = %self.algorithm,
            head = self.state.head,
            "simulation started"
        );
        self.log(format!("Starting simulation with {}", self.algorithm));
        self.log(format!("Wave {} released (requests 1-10)", WaveIndex::FIRST));
        self.publish();
        self.step();
    }

    /// Suspends a running simulation. No-op unless running.
    pub fn pause(&mut self) {
        if self.state.phase != Phase::Running {
            debug!(phase = ?self.state.phase, "pause ignored");
            return;
        }
        self.timer.cancel();
        self.state.phase = Phase::Paused;
        self.log("Simulation paused".to_string());
        self.publish();
    }

    /// Resumes a paused simulation and steps immediately. No-op unless paused.
    pub fn resume(&mut self) {
        if !self.state.is_paused() {
            debug!(phase = ?self.state.phase, "resume ignored");
            return;
        }
        self.state.phase = Phase::Running;
        self.log("Simulation resumed".to_string());
        self.publish();
        self.step();
    }

    /// Pauses when running, resumes when paused.
    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            Phase::Idle | Phase::Completed => {
                debug!(phase = ?self.state.phase, "toggle_pause ignored");
            }
        }
    }

    /// Returns to `Idle` with the initial run state. History is kept.
    ///
    /// Any scheduled step is invalidated.
    pub fn reset(&mut self) {
        self.timer.cancel();
        self.state = RunState::initial(&self.requests, self.config.initial_head);
        self.results.clear();
        info!("simulation reset");
        self.log("Simulation reset".to_string());
        self.publish();
    }

    /// Empties the session history.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.log("History cleared".to_string());
        self.sink.on_history(self.history.entries());
    }

    /// Sets the speed level (clamped to 1..=10). Applies from the next
    /// scheduled step.
    pub fn set_speed(&mut self, level: u8) {
        self.config.speed = clamp_speed(level);
        debug!(
            speed = self.config.speed,
            delay_ms = self.config.step_delay().as_millis() as u64,
            "speed changed"
        );
    }

    // ======================== Driving ========================

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// The step currently scheduled, if any.
    pub fn next_step(&self) -> Option<StepTicket> {
        self.timer.scheduled()
    }

    /// Runs a scheduled step.
    ///
    /// Returns `false` without touching any state if the ticket is stale
    /// (superseded, cancelled by pause/reset, or already fired).
    pub fn fire(&mut self, ticket: StepTicket) -> bool {
        if !self.timer.claim(ticket) {
            trace!(generation = ticket.generation(), "stale step ignored");
            return false;
        }
        self.now = self.now.max(ticket.due_at());
        self.step();
        true
    }

    /// Advances virtual time by `elapsed`, firing every step that falls due.
    ///
    /// Returns the number of steps fired.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let until = self.now + elapsed;
        let mut fired = 0;
        while let Some(ticket) = self.timer.due(until) {
            if self.fire(ticket) {
                fired += 1;
            }
        }
        self.now = until;
        fired
    }

    /// Fires scheduled steps back-to-back until none remain.
    ///
    /// Returns the history entry of the run if it completed.
    pub fn run_to_completion(&mut self) -> Option<&HistoryEntry> {
        while let Some(ticket) = self.timer.scheduled() {
            let _ = self.fire(ticket);
        }
        if self.state.phase == Phase::Completed {
            self.history.last()
        } else {
            None
        }
    }

    // ======================== Read access ========================

    /// Current run state.
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Snapshot of the current state and latest result.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.algorithm, self.results.last().copied())
    }

    /// Results log of the current run.
    pub fn results(&self) -> &[StepResult] {
        &self.results
    }

    /// Session history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The request universe.
    pub fn requests(&self) -> &RequestSet {
        &self.requests
    }

    /// Selected algorithm.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Effective configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// KPIs of the current run so far.
    pub fn kpi(&self) -> RunKpi {
        RunKpi::calculate(&self.results)
    }

    /// The display sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the display sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the engine, returning the display sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    // ======================== Internals ========================

    fn step(&mut self) {
        if !self.state.is_running() {
            return;
        }

        self.release_due_wave();

        let context = HeadContext::at(self.state.head).with_direction(self.state.direction);
        let next: Option<Request> = self
            .policy
            .select(self.state.pending.as_slice(), &context)
            .copied();
        let Some(target) = next else {
            self.complete();
            return;
        };

        let from = self.state.head;
        let tracks_moved = target.distance_from(from);
        let previous = self.state.direction;
        let direction = previous.after_move(from, target.cylinder);
        let direction_changed = previous.reverses_into(direction);

        self.state.total_tracks += u64::from(tracks_moved);
        if direction_changed {
            self.state.direction_changes += 1;
        }
        self.state.head = target.cylinder;
        self.state.direction = direction;

        let _ = self.state.pending.remove(target.id);
        self.results.push(StepResult {
            request_id: target.id,
            tracks_moved,
            direction_changed,
        });
        self.state.processed += 1;

        debug!(
            request = target.id,
            from,
            to = target.cylinder,
            tracks_moved,
            direction_changed,
            pending = self.state.pending.len(),
            "step"
        );
        self.log(format!(
            "Serving request {}: cylinder {} ({} tracks)",
            target.id, target.cylinder, tracks_moved
        ));
        if direction_changed {
            self.log(format!("Direction change: {} {}", direction.arrow(), direction));
        }
        self.publish();
        self.schedule_next();
    }

    fn release_due_wave(&mut self) {
        let index = usize::from(self.state.wave.get()) - 1;
        if WAVE_RELEASE_AT.get(index) != Some(&self.state.processed) {
            return;
        }
        let Some(next) = self.state.wave.next() else {
            return;
        };
        let released = self.requests.wave(next);
        let (first, last) = (
            released.first().map_or(0, |r| r.id),
            released.last().map_or(0, |r| r.id),
        );
        self.state.pending.admit(released);
        self.state.wave = next;

        info!(wave = next.get(), processed = self.state.processed, "wave released");
        self.log(format!(
            "New requests! Wave {next} released (requests {first}-{last})"
        ));
    }

    fn complete(&mut self) {
        self.timer.cancel();
        self.state.phase = Phase::Completed;
        self.state.processed = REQUEST_COUNT;
        self.state.wave = WaveIndex::LAST;

        let entry = HistoryEntry::now(
            self.algorithm,
            self.state.total_tracks,
            self.state.direction_changes,
        );
        self.history.push(entry);

        info!(
            algorithm = %self.algorithm,
            total_tracks = self.state.total_tracks,
            direction_changes = self.state.direction_changes,
            "simulation completed"
        );
        self.log("Simulation completed".to_string());
        self.log(format!(
            "Summary: {} tracks travelled, {} direction changes",
            self.state.total_tracks, self.state.direction_changes
        ));
        self.publish();
        self.sink.on_history(self.history.entries());
    }

    fn schedule_next(&mut self) {
        let ticket = self.timer.schedule(self.now, self.config.step_delay());
        trace!(due_at_ms = ticket.due_at().as_millis() as u64, "next step scheduled");
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        self.sink.on_snapshot(&snapshot);
    }

    fn log(&mut self, line: String) {
        self.sink.on_log(&line);
    }
}

impl<S: DisplaySink + std::fmt::Debug> std::fmt::Debug for SimulationEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationEngine")
            .field("algorithm", &self.algorithm)
            .field("state", &self.state)
            .field("processed", &self.results.len())
            .field("history", &self.history.len())
            .field("now", &self.now)
            .field("sink", &self.sink)
            .finish()
    }
}
