//! Shared error types used across submodules.

use thiserror::Error;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum RlcError {
    /// Raised when a circuit parameter is outside its physical domain.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name (e.g. `inductance`).
        name: &'static str,
        /// Offending value.
        value: f64,
        /// What the parameter must satisfy.
        reason: &'static str,
    },
    /// Raised when a sweep has no samples to search.
    #[error("degenerate sweep: {0}")]
    DegenerateSweep(String),
    /// Wraps failures while writing reports or images.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Raised by the drawing backend.
    #[error("render error: {0}")]
    Render(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RlcError>;
