//! Head travel direction.

use serde::{Deserialize, Serialize};

/// Direction the head last moved in.
///
/// `None` is the neutral state before the first move of a run. Moving to
/// the cylinder the head already sits on leaves the direction unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// No move yet.
    #[default]
    None,
    /// Toward higher cylinders.
    Increasing,
    /// Toward lower cylinders.
    Decreasing,
}

impl Direction {
    /// Direction of a move from `from` to `to`, or `None` when they are equal.
    pub fn of_move(from: u32, to: u32) -> Option<Self> {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Some(Direction::Increasing),
            std::cmp::Ordering::Less => Some(Direction::Decreasing),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Direction after moving from `from` to `to`, starting from `self`.
    pub fn after_move(self, from: u32, to: u32) -> Self {
        Self::of_move(from, to).unwrap_or(self)
    }

    /// Whether switching to `next` counts as a reversal.
    ///
    /// Leaving the neutral state is never a reversal.
    pub fn reverses_into(self, next: Direction) -> bool {
        self != Direction::None && next != self
    }

    /// Arrow glyph for compact rendering.
    pub fn arrow(self) -> &'static str {
        match self {
            Direction::None => "·",
            Direction::Increasing => "→",
            Direction::Decreasing => "←",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Direction::None => "NONE",
            Direction::Increasing => "INCREASING",
            Direction::Decreasing => "DECREASING",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of_move() {
        assert_eq!(Direction::of_move(20, 25), Some(Direction::Increasing));
        assert_eq!(Direction::of_move(25, 10), Some(Direction::Decreasing));
        assert_eq!(Direction::of_move(10, 10), None);
    }

    #[test]
    fn test_equal_cylinder_keeps_direction() {
        assert_eq!(Direction::Decreasing.after_move(10, 10), Direction::Decreasing);
        assert_eq!(Direction::None.after_move(10, 10), Direction::None);
    }

    #[test]
    fn test_first_move_is_not_a_reversal() {
        assert!(!Direction::None.reverses_into(Direction::Decreasing));
        assert!(!Direction::None.reverses_into(Direction::Increasing));
        assert!(Direction::Increasing.reverses_into(Direction::Decreasing));
        assert!(!Direction::Decreasing.reverses_into(Direction::Decreasing));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Direction::Increasing).unwrap();
        assert_eq!(json, "\"INCREASING\"");
    }
}
