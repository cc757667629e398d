//! Simulation configuration.
//!
//! Parameters that control a run: starting head position, pacing, N-Step
//! group size and request seeding. Every field has a default, so a config
//! document only needs to name what it overrides:
//!
//! ```
//! use disk_sched::config::SimulationConfig;
//!
//! let config = SimulationConfig::from_toml_str("algorithm = \"SSTF\"\nspeed = 8").unwrap();
//! assert_eq!(config.speed, 8);
//! assert_eq!(config.initial_head, 20);
//! ```
//!
//! Out-of-range values are clamped by [`SimulationConfig::normalized`],
//! never rejected.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::SimResult;
use crate::models::{MAX_CYLINDER, REQUEST_COUNT};
use crate::policy::Algorithm;

/// Slowest speed level.
pub const MIN_SPEED: u8 = 1;
/// Fastest speed level.
pub const MAX_SPEED: u8 = 10;
/// Default speed level.
pub const DEFAULT_SPEED: u8 = 5;
/// Head position at the start of every run.
pub const DEFAULT_INITIAL_HEAD: u32 = 20;
/// Default N for N-Step SCAN.
pub const DEFAULT_NSTEP_GROUP_SIZE: usize = 5;
/// Longest allowed delay between steps (ms).
pub const MAX_STEP_DELAY_MS: u64 = 60_000;

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Policy selected at construction.
    pub algorithm: Algorithm,

    /// Cylinder the head starts on (0..=39).
    pub initial_head: u32,

    /// Speed level (1 = slowest, 10 = fastest).
    pub speed: u8,

    /// Delay between steps at the fastest speed (ms).
    pub min_delay_ms: u64,

    /// Delay between steps at the slowest speed (ms).
    pub max_delay_ms: u64,

    /// Group size for N-Step SCAN.
    pub nstep_group_size: usize,

    /// Seed for request generation. `None` = non-deterministic.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Fcfs,
            initial_head: DEFAULT_INITIAL_HEAD,
            speed: DEFAULT_SPEED,
            min_delay_ms: 100,
            max_delay_ms: 1000,
            nstep_group_size: DEFAULT_NSTEP_GROUP_SIZE,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Parses a TOML document and normalizes the result.
    pub fn from_toml_str(doc: &str) -> SimResult<Self> {
        let config: SimulationConfig = toml::from_str(doc)?;
        Ok(config.normalized())
    }

    /// Creates a config for tests (fastest pacing, fixed seed).
    pub fn deterministic(seed: u64) -> Self {
        Self {
            speed: MAX_SPEED,
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Sets the algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the speed level (clamped).
    pub fn with_speed(mut self, speed: u8) -> Self {
        self.speed = clamp_speed(speed);
        self
    }

    /// Sets the request seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns a copy with every field clamped into its valid range.
    pub fn normalized(mut self) -> Self {
        self.initial_head = self.initial_head.min(MAX_CYLINDER);
        self.speed = clamp_speed(self.speed);
        self.min_delay_ms = self.min_delay_ms.min(MAX_STEP_DELAY_MS);
        self.max_delay_ms = self.max_delay_ms.min(MAX_STEP_DELAY_MS);
        if self.min_delay_ms > self.max_delay_ms {
            std::mem::swap(&mut self.min_delay_ms, &mut self.max_delay_ms);
        }
        self.nstep_group_size = self.nstep_group_size.clamp(1, REQUEST_COUNT);
        self
    }

    /// Delay between consecutive steps at the current speed.
    ///
    /// Linear in speed: level 1 waits `max_delay_ms`, level 10 waits
    /// `min_delay_ms`. With the defaults this is `1000 - (speed - 1) * 100` ms.
    pub fn step_delay(&self) -> Duration {
        let speed = u128::from(clamp_speed(self.speed) - MIN_SPEED);
        let levels = u128::from(MAX_SPEED - MIN_SPEED);
        let (lo, hi) = if self.min_delay_ms <= self.max_delay_ms {
            (self.min_delay_ms, self.max_delay_ms)
        } else {
            (self.max_delay_ms, self.min_delay_ms)
        };
        // u128 keeps un-normalized configs from overflowing
        let reduction = (u128::from(hi - lo) * speed / levels) as u64;
        Duration::from_millis(hi - reduction)
    }

    /// Human-readable label for the current speed level.
    pub fn speed_label(&self) -> &'static str {
        match clamp_speed(self.speed) {
            1 | 2 => "Very slow",
            3 | 4 => "Slow",
            5 | 6 => "Normal",
            7 | 8 => "Fast",
            _ => "Very fast",
        }
    }
}

/// Clamps a speed level into `1..=10`.
pub fn clamp_speed(speed: u8) -> u8 {
    speed.clamp(MIN_SPEED, MAX_SPEED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.initial_head, 20);
        assert_eq!(config.speed, 5);
        assert_eq!(config.nstep_group_size, 5);
        assert_eq!(config.algorithm, Algorithm::Fcfs);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_step_delay_linear() {
        for speed in MIN_SPEED..=MAX_SPEED {
            let config = SimulationConfig::default().with_speed(speed);
            let expected = 1000 - (u64::from(speed) - 1) * 100;
            assert_eq!(config.step_delay(), Duration::from_millis(expected));
        }
    }

    #[test]
    fn test_speed_clamped() {
        assert_eq!(SimulationConfig::default().with_speed(0).speed, 1);
        assert_eq!(SimulationConfig::default().with_speed(200).speed, 10);

        let raw = SimulationConfig {
            speed: 42,
            ..SimulationConfig::default()
        };
        assert_eq!(raw.step_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_normalized_clamps_everything() {
        let config = SimulationConfig {
            initial_head: 99,
            speed: 0,
            min_delay_ms: 500,
            max_delay_ms: 50,
            nstep_group_size: 0,
            ..SimulationConfig::default()
        }
        .normalized();

        assert_eq!(config.initial_head, MAX_CYLINDER);
        assert_eq!(config.speed, MIN_SPEED);
        assert_eq!((config.min_delay_ms, config.max_delay_ms), (50, 500));
        assert_eq!(config.nstep_group_size, 1);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = SimulationConfig::from_toml_str(
            r#"
            algorithm = "ESCHENBACH"
            initial_head = 7
            seed = 11
            "#,
        )
        .unwrap();
        assert_eq!(config.algorithm, Algorithm::Eschenbach);
        assert_eq!(config.initial_head, 7);
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.speed, DEFAULT_SPEED);
    }

    #[test]
    fn test_from_toml_clamps() {
        let config = SimulationConfig::from_toml_str("initial_head = 80\nspeed = 15").unwrap();
        assert_eq!(config.initial_head, MAX_CYLINDER);
        assert_eq!(config.speed, MAX_SPEED);
    }

    #[test]
    fn test_from_toml_clamps_delays() {
        let config =
            SimulationConfig::from_toml_str("max_delay_ms = 9223372036854775807\nspeed = 5\nseed = 1")
                .unwrap();
        assert_eq!(config.max_delay_ms, MAX_STEP_DELAY_MS);
        assert_eq!(config.min_delay_ms, 100);

        let expected = MAX_STEP_DELAY_MS - (MAX_STEP_DELAY_MS - 100) * 4 / 9;
        assert_eq!(config.step_delay(), Duration::from_millis(expected));
    }

    #[test]
    fn test_step_delay_huge_unnormalized() {
        let raw = SimulationConfig {
            min_delay_ms: 0,
            max_delay_ms: u64::MAX,
            speed: 5,
            ..SimulationConfig::default()
        };
        let delay = raw.step_delay();
        assert!(delay > Duration::ZERO);
        assert!(delay < Duration::from_millis(u64::MAX));
    }

    #[test]
    fn test_from_toml_rejects_bad_algorithm() {
        assert!(SimulationConfig::from_toml_str("algorithm = \"LOOK\"").is_err());
    }

    #[test]
    fn test_speed_label() {
        assert_eq!(SimulationConfig::default().speed_label(), "Normal");
        assert_eq!(SimulationConfig::default().with_speed(1).speed_label(), "Very slow");
        assert_eq!(SimulationConfig::default().with_speed(10).speed_label(), "Very fast");
    }
}
