//! Input validation for process batches.
//!
//! Converts raw user-entered rows into a [`Process`] batch, rejecting:
//! - Process counts outside the configured range
//! - Empty fields
//! - Non-numeric or negative arrival times
//! - Non-numeric, zero or negative burst times
//! - Batches whose latest arrival plus total burst overflows the clock
//!
//! All problems are reported together, not just the first one. The
//! scheduler itself performs no validation beyond [`validate_processes`].

use std::collections::HashSet;

use crate::config::SimulatorConfig;
use crate::models::{Process, ProcessId};

/// Validation result.
pub type ValidationResult<T = ()> = Result<T, Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Process count outside the accepted range.
    InvalidCount,
    /// Arrival time negative or non-numeric.
    InvalidArrival,
    /// Burst time zero, negative, or non-numeric.
    InvalidBurst,
    /// A required field was left empty.
    MissingInput,
    /// Two processes share the same ID.
    DuplicateId,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Parses the requested number of processes.
pub fn parse_count(text: &str, config: &SimulatorConfig) -> Result<usize, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::new(
            ValidationErrorKind::MissingInput,
            "number of processes is empty",
        ));
    }
    let count: usize = text.parse().map_err(|_| {
        ValidationError::new(
            ValidationErrorKind::InvalidCount,
            format!("number of processes '{text}' is not a whole number"),
        )
    })?;
    check_count(count, config)?;
    Ok(count)
}

fn check_count(count: usize, config: &SimulatorConfig) -> Result<(), ValidationError> {
    if config.process_range().contains(&count) {
        Ok(())
    } else {
        Err(ValidationError::new(
            ValidationErrorKind::InvalidCount,
            format!(
                "number of processes must be between {} and {}, got {count}",
                config.min_processes, config.max_processes
            ),
        ))
    }
}

/// Parses raw `(arrival, burst)` text rows into a process batch.
///
/// IDs are assigned 1, 2, 3, ... in row order.
///
/// # Returns
/// The batch if every row is valid, otherwise every detected error.
///
/// # Example
///
/// ```
/// use srtf_sim::config::SimulatorConfig;
/// use srtf_sim::validation::{parse_processes, ValidationErrorKind};
///
/// let config = SimulatorConfig::default();
/// let batch = parse_processes(&[("0", "8"), ("1", "4")], &config).unwrap();
/// assert_eq!(batch.len(), 2);
///
/// let errors = parse_processes(&[("0", "0")], &config).unwrap_err();
/// assert_eq!(errors[0].kind, ValidationErrorKind::InvalidBurst);
/// ```
pub fn parse_processes<S: AsRef<str>>(
    rows: &[(S, S)],
    config: &SimulatorConfig,
) -> ValidationResult<Vec<Process>> {
    let mut errors = Vec::new();

    if let Err(e) = check_count(rows.len(), config) {
        errors.push(e);
    }

    let mut processes = Vec::with_capacity(rows.len());
    for ((arrival, burst), id) in rows.iter().zip(1..) {
        let arrival = parse_arrival(id, arrival.as_ref());
        let burst = parse_burst(id, burst.as_ref());
        match (arrival, burst) {
            (Ok(a), Ok(b)) => processes.push(Process::new(id, a, b)),
            (a, b) => errors.extend(a.err().into_iter().chain(b.err())),
        }
    }

    if errors.is_empty() {
        if let Err(e) = check_horizon(&processes) {
            errors.push(e);
        }
    }

    if errors.is_empty() {
        Ok(processes)
    } else {
        Err(errors)
    }
}

fn parse_arrival(id: ProcessId, text: &str) -> Result<u64, ValidationError> {
    let value = parse_field(id, "arrival", text, ValidationErrorKind::InvalidArrival)?;
    u64::try_from(value).map_err(|_| {
        ValidationError::new(
            ValidationErrorKind::InvalidArrival,
            format!("P{id}: arrival time must not be negative, got {value}"),
        )
    })
}

fn parse_burst(id: ProcessId, text: &str) -> Result<u64, ValidationError> {
    let value = parse_field(id, "burst", text, ValidationErrorKind::InvalidBurst)?;
    if value <= 0 {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidBurst,
            format!("P{id}: burst time must be positive, got {value}"),
        ));
    }
    Ok(value as u64)
}

fn parse_field(
    id: ProcessId,
    field: &str,
    text: &str,
    kind: ValidationErrorKind,
) -> Result<i64, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::new(
            ValidationErrorKind::MissingInput,
            format!("P{id}: {field} time is empty"),
        ));
    }
    text.parse::<i64>().map_err(|_| {
        ValidationError::new(
            kind,
            format!("P{id}: {field} time '{text}' is not a whole number"),
        )
    })
}

/// Checks that the simulated clock cannot overflow.
///
/// The clock never passes `max(arrival) + sum(burst)`.
fn check_horizon(processes: &[Process]) -> Result<(), ValidationError> {
    let latest_arrival = processes.iter().map(|p| p.arrival).max().unwrap_or(0);
    processes
        .iter()
        .try_fold(latest_arrival, |acc, p| acc.checked_add(p.burst))
        .map(|_| ())
        .ok_or_else(|| {
            ValidationError::new(
                ValidationErrorKind::InvalidBurst,
                format!(
                    "latest arrival plus total burst exceeds the maximum simulated time ({})",
                    u64::MAX
                ),
            )
        })
}

/// Checks the scheduler's preconditions on an already-typed batch.
///
/// Checks:
/// 1. The batch is non-empty
/// 2. Every burst is positive
/// 3. No duplicate process IDs
/// 4. The simulated clock cannot overflow
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();

    if processes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidCount,
            "process batch is empty",
        ));
    }

    let mut ids = HashSet::new();
    for p in processes {
        if p.burst == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidBurst,
                format!("P{}: burst time must be positive", p.id),
            ));
        }
        if !ids.insert(p.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", p.id),
            ));
        }
    }

    if let Err(e) = check_horizon(processes) {
        errors.push(e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
