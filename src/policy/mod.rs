//! Disk-scheduling policies.
//!
//! Each policy orders the pending requests given the current head position
//! and direction. The engine serves only the head of the order, but the
//! full order is computed deterministically so it can be inspected and
//! tested.
//!
//! # Usage
//!
//! ```
//! use disk_sched::models::{Direction, Request};
//! use disk_sched::policy::{rules, HeadContext, SchedulingPolicy};
//!
//! let pending = vec![Request::new(1, 35), Request::new(2, 18), Request::new(3, 24)];
//! let ctx = HeadContext::at(20).with_direction(Direction::Increasing);
//!
//! let next = rules::Sstf.select(&pending, &ctx).map(|r| r.id);
//! assert_eq!(next, Some(2));
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 11.2
//! - Stallings (2018), "Operating Systems: Internals and Design Principles", Ch. 11.5
//! - Teorey & Pinkerton (1972), "A Comparative Analysis of Disk Scheduling Policies"

mod catalogue;
mod context;
pub mod rules;

pub use catalogue::Algorithm;
pub use context::HeadContext;

use crate::models::Request;
use std::fmt::Debug;

/// A disk-scheduling policy.
///
/// # Contract
/// `order` returns a permutation of `pending`: every request exactly once,
/// nothing added. Equal keys are always broken by ascending request id, so
/// the result is fully deterministic. An empty pending set yields an empty
/// order.
pub trait SchedulingPolicy: Send + Sync + Debug {
    /// Policy name (e.g., "SSTF", "CSCAN").
    fn name(&self) -> &'static str;

    /// Orders the pending requests, next-to-serve first.
    fn order<'a>(&self, pending: &'a [Request], context: &HeadContext) -> Vec<&'a Request>;

    /// The request to serve next, if any.
    fn select<'a>(&self, pending: &'a [Request], context: &HeadContext) -> Option<&'a Request> {
        self.order(pending, context).first().copied()
    }

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
