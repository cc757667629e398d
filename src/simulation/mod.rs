//! Step-driven simulation of a disk head serving arriving requests.
//!
//! The engine owns all mutable run state. Display sinks observe read-only
//! snapshots; a driver redeems scheduled steps against a virtual clock.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use disk_sched::config::SimulationConfig;
//! use disk_sched::simulation::{Phase, RecordingSink, SimulationEngine};
//!
//! let mut engine = SimulationEngine::with_sink(
//!     SimulationConfig::deterministic(7),
//!     RecordingSink::new(),
//! );
//! engine.start();
//! assert_eq!(engine.state().processed, 1);
//!
//! // one step every 100 ms at full speed
//! engine.advance(Duration::from_millis(500));
//! assert_eq!(engine.state().processed, 6);
//!
//! engine.pause();
//! assert_eq!(engine.state().phase, Phase::Paused);
//! ```
//!
//! # Reference
//! Teorey & Pinkerton (1972), "A Comparative Analysis of Disk Scheduling
//! Policies"

mod display;
mod engine;
mod kpi;
mod state;
mod timer;

pub use display::{DisplaySink, NullSink, RecordingSink, TracingSink};
pub use engine::{SimulationEngine, WAVE_RELEASE_AT};
pub use kpi::RunKpi;
pub use state::{Phase, RunState, Snapshot};
pub use timer::{StepTicket, StepTimer};
