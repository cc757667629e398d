//! Error type for fallible input handling.
//!
//! The simulation itself never fails: invalid transitions are no-ops and
//! out-of-range settings are clamped. Errors only arise when parsing
//! external input (algorithm names, config files, explicit request lists).

use thiserror::Error;

use crate::validation::ValidationError;

/// Unified error type for the crate.
#[derive(Debug, Error)]
pub enum SimError {
    /// An algorithm name did not match any known policy.
    #[error("Unknown algorithm: '{0}' (expected one of FCFS, SSTF, SCAN, CSCAN, NSTEP, ESCHENBACH)")]
    UnknownAlgorithm(String),

    /// A configuration document could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// An explicit request list failed validation.
    #[error("Invalid request set: {}", summarize(.0))]
    InvalidRequests(Vec<ValidationError>),
}

/// Convenience alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
