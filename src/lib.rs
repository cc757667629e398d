//! Disk-scheduling simulator.
//!
//! Simulates a single disk head serving 30 requests that arrive in three
//! waves, under one of six classic scheduling policies, and compares runs
//! by total tracks travelled and head reversals.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Request`, `RequestSet`, `PendingQueue`,
//!   `Direction`, `StepResult`, `History`
//! - **`policy`**: `SchedulingPolicy` trait and the FCFS, SSTF, SCAN,
//!   C-SCAN, N-STEP and Eschenbach rules
//! - **`simulation`**: `SimulationEngine` state machine, step timer,
//!   display sinks and run KPIs
//! - **`config`**: `SimulationConfig` (TOML-loadable)
//! - **`validation`**: Request-set integrity checks
//! - **`error`**: `SimError`
//!
//! # Disk Geometry
//!
//! 40 cylinders (0-39), 10 surfaces, 16 sectors. Only the cylinder affects
//! seek cost.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 11
//! - Teorey & Pinkerton (1972), "A Comparative Analysis of Disk Scheduling Policies"

pub mod config;
pub mod error;
pub mod models;
pub mod policy;
pub mod simulation;
pub mod validation;

pub use config::SimulationConfig;
pub use error::{SimError, SimResult};
pub use policy::Algorithm;
pub use simulation::SimulationEngine;
