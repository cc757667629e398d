//! Disk-scheduling domain models.
//!
//! Provides the data types shared by the policies and the simulation
//! engine: requests and their arrival waves, head direction, per-step
//! results and the cross-run history.
//!
//! # Lifecycle
//!
//! | Type | Created | Mutated |
//! |------|---------|---------|
//! | `Request` | once, by `RequestSet` | never |
//! | `PendingQueue` | per run | by the engine only |
//! | `StepResult` | per served request | never |
//! | `HistoryEntry` | per completed run | never |

mod direction;
mod history;
mod request;

pub use direction::Direction;
pub use history::{History, HistoryEntry, StepResult};
pub use request::{
    PendingQueue, Request, RequestSet, WaveIndex, CYLINDER_COUNT, MAX_CYLINDER, REQUEST_COUNT,
    SECTOR_COUNT, SURFACE_COUNT, WAVE_COUNT, WAVE_SIZE,
};
