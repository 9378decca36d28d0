// src/error.rs
use std::fmt;

/// Error types for the fast-langevin library
#[derive(Debug, Clone, PartialEq)]
pub enum LangevinError {
    /// Invalid parameter values
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Scratch or field buffer does not match the grid size
    BufferMismatch {
        buffer: String,
        expected: usize,
        actual: usize,
    },

    /// Non-finite values produced during an integration step
    NumericalInstability { method: String, reason: String },

    /// Invalid driver configuration
    InvalidConfiguration { field: String, reason: String },

    /// Grid wiring could not be built for the requested layout
    GridConstruction { reason: String },

    /// Initial condition could not be applied to the grid
    InitialCondition { reason: String },

    /// A run would step past the number of planned epochs
    EpochOverrun { requested: usize, available: usize },
}

impl fmt::Display for LangevinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LangevinError::InvalidParameters {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
            LangevinError::BufferMismatch {
                buffer,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Buffer '{}' has length {} but the grid has {} cells",
                    buffer, actual, expected
                )
            }
            LangevinError::NumericalInstability { method, reason } => {
                write!(f, "Numerical instability in {}: {}", method, reason)
            }
            LangevinError::InvalidConfiguration { field, reason } => {
                write!(f, "Invalid configuration for '{}': {}", field, reason)
            }
            LangevinError::GridConstruction { reason } => {
                write!(f, "Could not construct grid: {}", reason)
            }
            LangevinError::InitialCondition { reason } => {
                write!(f, "Could not apply initial condition: {}", reason)
            }
            LangevinError::EpochOverrun {
                requested,
                available,
            } => {
                write!(
                    f,
                    "Too many epochs: {} requested but only {} planned",
                    requested, available
                )
            }
        }
    }
}

impl std::error::Error for LangevinError {}

/// Result type alias for fast-langevin operations
pub type LangevinResult<T> = Result<T, LangevinError>;

/// Validation utilities
pub mod validation {
    use super::{LangevinError, LangevinResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> LangevinResult<()> {
        if value.is_nan() || value <= 0.0 {
            Err(LangevinError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> LangevinResult<()> {
        if value.is_nan() || value < 0.0 {
            Err(LangevinError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> LangevinResult<()> {
        if !value.is_finite() {
            Err(LangevinError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a buffer has one entry per grid cell
    pub fn validate_buffer_len(name: &str, actual: usize, n_cells: usize) -> LangevinResult<()> {
        if actual != n_cells {
            Err(LangevinError::BufferMismatch {
                buffer: name.to_string(),
                expected: n_cells,
                actual,
            })
        } else {
            Ok(())
        }
    }

    /// Validate grid cell count
    pub fn validate_n_cells(n_cells: usize) -> LangevinResult<()> {
        if n_cells == 0 {
            Err(LangevinError::InvalidConfiguration {
                field: "n_cells".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if n_cells > 100_000_000 {
            Err(LangevinError::InvalidConfiguration {
                field: "n_cells".to_string(),
                reason: "exceeds maximum allowed (100 million)".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
