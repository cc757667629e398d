//! Input validation for explicit request sets.
//!
//! Generated sets are correct by construction; sets supplied by callers
//! (scripted scenarios, replays) are checked before a run accepts them.
//! Detects:
//! - Wrong request count
//! - Duplicate ids
//! - Ids out of arrival order (ids must run 1..=30)
//! - Cylinder, surface or sector out of range
//!
//! All issues are collected; validation does not stop at the first one.

use std::collections::HashSet;
use std::fmt;

use crate::models::{Request, MAX_CYLINDER, REQUEST_COUNT, SECTOR_COUNT, SURFACE_COUNT};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The set does not hold exactly 30 requests.
    WrongCount,
    /// Two requests share the same id.
    DuplicateId,
    /// A request's id does not match its position (ids must be 1..=30 in order).
    OutOfOrderId,
    /// Cylinder, surface or sector outside the disk geometry.
    OutOfRange,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates an explicit request list.
///
/// Checks:
/// 1. Exactly 30 requests
/// 2. No duplicate ids
/// 3. The request at position `i` has id `i + 1`
/// 4. `cylinder <= 39`, `surface <= 9`, `sector <= 15`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_requests(requests: &[Request]) -> ValidationResult {
    let mut errors = Vec::new();

    if requests.len() != REQUEST_COUNT {
        errors.push(ValidationError::new(
            ValidationErrorKind::WrongCount,
            format!(
                "Expected {REQUEST_COUNT} requests, found {}",
                requests.len()
            ),
        ));
    }

    let mut ids = HashSet::new();
    for (pos, request) in requests.iter().enumerate() {
        if !ids.insert(request.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate request ID: {}", request.id),
            ));
        } else if request.id as usize != pos + 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::OutOfOrderId,
                format!(
                    "Request at position {} has ID {} (expected {})",
                    pos + 1,
                    request.id,
                    pos + 1
                ),
            ));
        }

        if request.cylinder > MAX_CYLINDER {
            errors.push(out_of_range(request.id, "cylinder", request.cylinder, MAX_CYLINDER));
        }
        if request.surface >= SURFACE_COUNT {
            errors.push(out_of_range(request.id, "surface", request.surface, SURFACE_COUNT - 1));
        }
        if request.sector >= SECTOR_COUNT {
            errors.push(out_of_range(request.id, "sector", request.sector, SECTOR_COUNT - 1));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn out_of_range(id: u32, field: &str, value: u32, max: u32) -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::OutOfRange,
        format!("Request {id}: {field} {value} exceeds maximum {max}"),
    )
}
