//! Error handling for CycleKit
//!
//! Provides the error types for every layer of the converter:
//! - Cycle diagnostics (per-line problems that never abort a conversion)
//! - Conversion errors (input the engine refuses outright)
//! - The unified `Error` used by settings and file handling
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Diagnostic raised for a single canned-cycle line
///
/// A diagnostic marks one cycle that could not be expanded. The conversion
/// still completes; the offending line is carried into the output as a
/// comment so the operator can see what was skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CycleDiagnostic {
    /// A parameter the cycle cannot run without is absent
    #[error("{cycle} at line {line_number}: missing required parameter '{parameter}'")]
    MissingParameter {
        /// The cycle code, e.g. "G81".
        cycle: String,
        /// The absent parameter letter.
        parameter: char,
        /// 1-based line number in the input program.
        line_number: usize,
    },

    /// A parameter is present but unusable
    #[error("{cycle} at line {line_number}: invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The cycle code, e.g. "G83".
        cycle: String,
        /// The offending parameter letter.
        parameter: char,
        /// 1-based line number in the input program.
        line_number: usize,
        /// Why the value was rejected.
        reason: String,
    },
}

impl CycleDiagnostic {
    /// Line number the diagnostic refers to
    pub fn line_number(&self) -> usize {
        match self {
            Self::MissingParameter { line_number, .. }
            | Self::InvalidParameter { line_number, .. } => *line_number,
        }
    }

    /// Parameter letter the diagnostic refers to
    pub fn parameter(&self) -> char {
        match self {
            Self::MissingParameter { parameter, .. }
            | Self::InvalidParameter { parameter, .. } => *parameter,
        }
    }

    /// Cycle code the diagnostic refers to
    pub fn cycle(&self) -> &str {
        match self {
            Self::MissingParameter { cycle, .. } | Self::InvalidParameter { cycle, .. } => cycle,
        }
    }
}

/// Conversion error type
///
/// Raised when a program cannot be converted at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Input is empty or contains only whitespace
    #[error("Input program is empty")]
    EmptyProgram,
}

/// Main error type for CycleKit
#[derive(Error, Debug)]
pub enum Error {
    /// Conversion error
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Configuration could not be read, parsed or validated
    #[error("Configuration error: {0}")]
    Config(String),

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

    /// Create a configuration error from a string message
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Check if this is a conversion error
    pub fn is_conversion_error(&self) -> bool {
        matches!(self, Error::Conversion(_))
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
