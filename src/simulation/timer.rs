//! Single-slot cancellable step timer.
//!
//! The engine never loops: each step schedules the next one here and
//! returns. A driver (tests, the CLI, a UI event loop) later redeems the
//! ticket once its deadline passes.
//!
//! # Cancellation
//!
//! Every `schedule` and `cancel` bumps a generation counter. A ticket is
//! honored only if it is the one currently held, so a deferred step from
//! before a pause or reset can never run.
//!
//! Time is virtual: a [`Duration`] since the engine was created, advanced
//! by the driver.

use std::time::Duration;

/// Handle for one scheduled step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepTicket {
    generation: u64,
    due_at: Duration,
}

impl StepTicket {
    /// Virtual time at which the step falls due.
    pub fn due_at(&self) -> Duration {
        self.due_at
    }

    /// Generation this ticket was issued under.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Holds at most one scheduled step.
#[derive(Debug, Default)]
pub struct StepTimer {
    generation: u64,
    scheduled: Option<StepTicket>,
}

impl StepTimer {
    /// Creates an idle timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a step `delay` after `now`, replacing any earlier one.
    pub fn schedule(&mut self, now: Duration, delay: Duration) -> StepTicket {
        self.generation = self.generation.wrapping_add(1);
        let ticket = StepTicket {
            generation: self.generation,
            due_at: now + delay,
        };
        self.scheduled = Some(ticket);
        ticket
    }

    /// Drops the scheduled step and invalidates every outstanding ticket.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.scheduled = None;
    }

    /// Consumes `ticket` if it is the one currently scheduled.
    pub fn claim(&mut self, ticket: StepTicket) -> bool {
        if self.scheduled == Some(ticket) {
            self.scheduled = None;
            true
        } else {
            false
        }
    }

    /// The scheduled step, if any.
    pub fn scheduled(&self) -> Option<StepTicket> {
        self.scheduled
    }

    /// The scheduled step if it is due at `now`.
    pub fn due(&self, now: Duration) -> Option<StepTicket> {
        self.scheduled.filter(|t| t.due_at <= now)
    }

    /// Current generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_schedule_and_claim() {
        let mut timer = StepTimer::new();
        let ticket = timer.schedule(Duration::ZERO, 500 * MS);
        assert_eq!(ticket.due_at(), 500 * MS);
        assert!(timer.due(499 * MS).is_none());
        assert_eq!(timer.due(500 * MS), Some(ticket));

        assert!(timer.claim(ticket));
        assert!(!timer.claim(ticket));
        assert!(timer.scheduled().is_none());
    }

    #[test]
    fn test_cancel_invalidates_ticket() {
        let mut timer = StepTimer::new();
        let ticket = timer.schedule(Duration::ZERO, 100 * MS);
        timer.cancel();
        assert!(!timer.claim(ticket));
        assert!(timer.scheduled().is_none());
    }

    #[test]
    fn test_reschedule_supersedes() {
        let mut timer = StepTimer::new();
        let old = timer.schedule(Duration::ZERO, 100 * MS);
        let new = timer.schedule(Duration::ZERO, 100 * MS);
        assert_ne!(old, new);
        assert!(!timer.claim(old));
        assert!(timer.claim(new));
    }

    #[test]
    fn test_generation_advances() {
        let mut timer = StepTimer::new();
        let before = timer.generation();
        let _ = timer.schedule(Duration::ZERO, MS);
        timer.cancel();
        assert_eq!(timer.generation(), before + 2);
    }
}
