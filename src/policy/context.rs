//! Head context for policy evaluation.

use crate::models::Direction;

/// Head state passed to scheduling policies.
///
/// Policies are pure: the same pending set and context always produce the
/// same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeadContext {
    /// Cylinder the head currently sits on.
    pub head: u32,
    /// Direction of the last move (`None` before the first move).
    pub direction: Direction,
}

impl HeadContext {
    /// Creates a context at the given cylinder with no direction yet.
    pub fn at(head: u32) -> Self {
        Self {
            head,
            direction: Direction::None,
        }
    }

    /// Sets the direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Whether the head is treated as sweeping upward.
    ///
    /// `None` counts as upward for sweep-based policies.
    pub fn sweeping_up(&self) -> bool {
        self.direction != Direction::Decreasing
    }
}
