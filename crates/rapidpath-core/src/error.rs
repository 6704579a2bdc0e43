//! Error handling for RapidPath
//!
//! Provides error types for the layers of the travel optimizer:
//! - Geometry errors (non-finite coordinates or heights)
//! - Optimizer errors (size budget, internal invariant failures)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Unparsable tokens in the source program are not errors: the reader skips
//! them before any value reaches this layer.

use thiserror::Error;

/// Geometry error type
///
/// Raised when a value that must be a finite real number is NaN or infinite.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A travel point has a non-finite coordinate
    #[error("Point {index} has a non-finite coordinate: ({x}, {y})")]
    NonFinitePoint {
        /// Position of the point in the optimizer input.
        index: usize,
        /// The X coordinate.
        x: f64,
        /// The Y coordinate.
        y: f64,
    },

    /// A height value is non-finite
    #[error("Height {value} is not a finite number")]
    NonFiniteHeight {
        /// The offending height.
        value: f64,
    },
}

/// Optimizer error type
///
/// Represents the conditions under which the travel optimizer refuses to
/// produce a tour. The optimizer never returns a partial ordering.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizerError {
    /// Input contains invalid geometry
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(#[from] GeometryError),

    /// Input exceeds the configured size budget
    #[error("Too many points: {count} exceeds the limit of {limit}")]
    TooManyPoints {
        /// Number of points supplied.
        count: usize,
        /// Configured maximum.
        limit: usize,
    },

    /// The matching step left odd-degree vertices unpaired
    #[error("Perfect matching incomplete: {unmatched} vertices unmatched")]
    MatchingIncomplete {
        /// Number of vertices without a mate.
        unmatched: usize,
    },
}

/// Main error type for RapidPath
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Optimizer error
    #[error(transparent)]
    Optimizer(#[from] OptimizerError),

    /// Geometry error raised outside the optimizer (e.g. height resolution)
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error was caused by non-finite input values
    pub fn is_invalid_geometry(&self) -> bool {
        matches!(
            self,
            Error::Geometry(_) | Error::Optimizer(OptimizerError::InvalidGeometry(_))
        )
    }

    /// Check if this error was caused by the size budget
    pub fn is_too_many_points(&self) -> bool {
        matches!(self, Error::Optimizer(OptimizerError::TooManyPoints { .. }))
    }

    /// Check if this is an I/O error
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
