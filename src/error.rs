//! Error types for little-tsp.
//!
//! Every fallible operation returns `Result<T, TspError>`. Infeasible
//! instances are not errors: the solver reports them as an empty tour.

use thiserror::Error;

use crate::matrix::Axis;

/// Result type alias for little-tsp operations.
pub type TspResult<T> = Result<T, TspError>;

/// Unified error type for all little-tsp operations.
///
/// Bounds and reconstruction errors signal a defect in the solver's own
/// bookkeeping; see [`TspError::is_invariant_violation`].
#[derive(Debug, Error)]
pub enum TspError {
    // ===== Matrix Errors =====
    /// A matrix was requested with a negative dimension.
    #[error("negative dimension {rows}x{cols}: dimensions must be positive or null")]
    NegativeDimension {
        /// Requested row count.
        rows: isize,
        /// Requested column count.
        cols: isize,
    },

    /// Row or column index outside the current matrix extent.
    #[error("{axis} index {index} violates the bounds [0, {limit})")]
    IndexOutOfBounds {
        /// Axis of the offending index.
        axis: Axis,
        /// The offending index.
        index: usize,
        /// Exclusive upper bound of the valid range.
        limit: usize,
    },

    /// Row of a nested input has the wrong length.
    #[error("ragged matrix: row {row} has {got} columns, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Expected column count.
        expected: usize,
        /// Actual column count.
        got: usize,
    },

    // ===== Solver Errors =====
    /// The cost matrix handed to the solver is not square.
    #[error("cost matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
    },

    /// Fewer than two cities.
    #[error("at least 2 cities are required, got {0}")]
    TooFewCities(usize),

    /// City label does not fit in the matrix cost type.
    #[error("city label {0} is not representable in the cost type")]
    CityLabel(usize),

    /// Forced edges did not chain into a single circuit.
    #[error("tour reconstruction failed: {0}")]
    Reconstruction(String),

    // ===== TSPLIB Errors =====
    /// Malformed TSPLIB input.
    #[error("TSPLIB line {line}: {message}")]
    Tsplib {
        /// One-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Keyword value outside the supported subset.
    #[error("TSPLIB {keyword} '{value}' is not supported")]
    Unsupported {
        /// The TSPLIB keyword.
        keyword: String,
        /// The rejected value.
        value: String,
    },

    /// A required keyword never appeared.
    #[error("TSPLIB keyword {0} is missing")]
    MissingKeyword(&'static str),

    /// Edge weight section does not match dimension and format.
    #[error("TSPLIB edge weight section holds {got} values, expected {expected}")]
    WeightCount {
        /// Count implied by dimension and format.
        expected: usize,
        /// Count actually read.
        got: usize,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TspError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a reconstruction error.
    #[must_use]
    pub fn reconstruction(message: impl Into<String>) -> Self {
        Self::Reconstruction(message.into())
    }

    /// Create a TSPLIB syntax error at a one-based line.
    #[must_use]
    pub fn tsplib(line: usize, message: impl Into<String>) -> Self {
        Self::Tsplib {
            line,
            message: message.into(),
        }
    }

    /// Create an unsupported-keyword-value error.
    #[must_use]
    pub fn unsupported(keyword: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Unsupported {
            keyword: keyword.into(),
            value: value.into(),
        }
    }

    /// Check if this error is an internal invariant violation.
    ///
    /// These are never caused by user input and are never retried.
    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfBounds { .. } | Self::Reconstruction(_)
        )
    }
}
