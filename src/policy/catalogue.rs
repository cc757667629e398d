//! Catalogue of the built-in policies.
//!
//! [`Algorithm`] is the value a caller selects (from a CLI flag, a config
//! file, a UI radio button); [`Algorithm::policy`] turns it into a
//! [`SchedulingPolicy`] the engine can run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::rules::{CScan, Eschenbach, Fcfs, NStep, Scan, Sstf};
use super::SchedulingPolicy;
use crate::error::SimError;

/// Selectable disk-scheduling algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Algorithm {
    /// First-Come, First-Served.
    #[default]
    Fcfs,
    /// Shortest Seek Time First.
    Sstf,
    /// SCAN (elevator).
    Scan,
    /// Circular SCAN.
    #[serde(alias = "C-SCAN")]
    CScan,
    /// N-Step SCAN.
    #[serde(alias = "N-STEP")]
    NStep,
    /// Eschenbach scheme.
    Eschenbach,
}

impl Algorithm {
    /// Every algorithm, in menu order.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Fcfs,
        Algorithm::Sstf,
        Algorithm::Scan,
        Algorithm::NStep,
        Algorithm::CScan,
        Algorithm::Eschenbach,
    ];

    /// Short name (e.g., "SSTF").
    pub fn name(self) -> &'static str {
        self.rule().name()
    }

    /// Expanded name (e.g., "Shortest Seek Time First").
    pub fn long_name(self) -> &'static str {
        self.rule().description()
    }

    /// One-paragraph explanation of the policy's behavior.
    pub fn summary(self) -> &'static str {
        match self {
            Algorithm::Fcfs => {
                "Serves requests in the exact order they arrived. The simplest policy, \
                 but it can be inefficient."
            }
            Algorithm::Sstf => {
                "Serves the pending request closest to the current head position. \
                 Reduces seek time but can starve distant requests."
            }
            Algorithm::Scan => {
                "The head moves in one direction serving requests until none remain \
                 ahead, then reverses. Similar to an elevator."
            }
            Algorithm::NStep => {
                "Splits pending requests into groups of N and applies SCAN within each \
                 group. Fairer than plain SCAN."
            }
            Algorithm::CScan => {
                "Circular version of SCAN: the head serves requests in one direction \
                 only, wrapping back to the lowest cylinder after the highest."
            }
            Algorithm::Eschenbach => {
                "Serves requests ahead of the head first, nearest first, then those \
                 behind it, aiming to minimize total access time."
            }
        }
    }

    /// Builds the policy; `group_size` only affects N-Step SCAN.
    pub fn policy(self, group_size: usize) -> Arc<dyn SchedulingPolicy> {
        match self {
            Algorithm::Fcfs => Arc::new(Fcfs),
            Algorithm::Sstf => Arc::new(Sstf),
            Algorithm::Scan => Arc::new(Scan),
            Algorithm::CScan => Arc::new(CScan),
            Algorithm::NStep => Arc::new(NStep::with_group_size(group_size.max(1))),
            Algorithm::Eschenbach => Arc::new(Eschenbach),
        }
    }

    fn rule(self) -> &'static dyn SchedulingPolicy {
        match self {
            Algorithm::Fcfs => &Fcfs,
            Algorithm::Sstf => &Sstf,
            Algorithm::Scan => &Scan,
            Algorithm::CScan => &CScan,
            Algorithm::NStep => &NStep {
                group_size: crate::config::DEFAULT_NSTEP_GROUP_SIZE,
            },
            Algorithm::Eschenbach => &Eschenbach,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SimError;

    /// Case-insensitive; accepts `C-SCAN` and `N-STEP` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_uppercase();
        match normalized.as_str() {
            "FCFS" | "FIFO" => Ok(Algorithm::Fcfs),
            "SSTF" => Ok(Algorithm::Sstf),
            "SCAN" | "ELEVATOR" => Ok(Algorithm::Scan),
            "CSCAN" => Ok(Algorithm::CScan),
            "NSTEP" | "NSTEPSCAN" => Ok(Algorithm::NStep),
            "ESCHENBACH" => Ok(Algorithm::Eschenbach),
            _ => Err(SimError::UnknownAlgorithm(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_policies() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.policy(5).name(), algorithm.name());
            assert_eq!(algorithm.to_string(), algorithm.name());
        }
    }

    #[test]
    fn test_from_str_variants() {
        assert_eq!("sstf".parse::<Algorithm>().unwrap(), Algorithm::Sstf);
        assert_eq!("C-SCAN".parse::<Algorithm>().unwrap(), Algorithm::CScan);
        assert_eq!("n-step".parse::<Algorithm>().unwrap(), Algorithm::NStep);
        assert_eq!(" Eschenbach ".parse::<Algorithm>().unwrap(), Algorithm::Eschenbach);
        assert!(matches!(
            "LOOK".parse::<Algorithm>(),
            Err(SimError::UnknownAlgorithm(name)) if name == "LOOK"
        ));
    }

    #[test]
    fn test_round_trip_through_name() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_serde_uppercase() {
        assert_eq!(serde_json::to_string(&Algorithm::CScan).unwrap(), "\"CSCAN\"");
        let parsed: Algorithm = serde_json::from_str("\"N-STEP\"").unwrap();
        assert_eq!(parsed, Algorithm::NStep);
    }

    #[test]
    fn test_long_names_and_summaries() {
        assert_eq!(Algorithm::Sstf.long_name(), "Shortest Seek Time First");
        assert_eq!(Algorithm::Scan.long_name(), "Elevator Algorithm");
        for algorithm in Algorithm::ALL {
            assert!(!algorithm.summary().is_empty());
        }
    }

    #[test]
    fn test_nstep_group_size_floor() {
        let policy = Algorithm::NStep.policy(0);
        assert_eq!(policy.name(), "NSTEP");
    }
}
