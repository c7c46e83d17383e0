//! Error types for gradual operations.
//!
//! Uses `thiserror` for ergonomic error definition. Every error here is
//! unrecoverable locally: the core never catches its own errors, and no
//! mutation happens before validation succeeds.

use thiserror::Error;

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for all gradual operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A value failed validation against a type descriptor.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Display name of the expected type.
        expected: String,
        /// Best-effort rendering of the offending value.
        actual: String,
    },

    /// A normalized index fell outside the valid range.
    #[error("index out of bounds: {index} (length {length})")]
    IndexOutOfBounds {
        /// The index as requested by the caller (possibly negative).
        index: i64,
        /// The collection length at the time of access.
        length: usize,
    },

    /// An empty Optional was unwrapped without a fallback.
    #[error("no value present")]
    Underflow,

    /// A checked callable was invoked with an unmatchable argument count.
    #[error("arity mismatch: expected {expected}, got {actual}")]
    ArityMismatch {
        /// Description of the acceptable argument count.
        expected: String,
        /// Actual number of arguments supplied.
        actual: usize,
    },
}

impl Error {
    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates an index out of bounds error.
    #[must_use]
    pub fn index_out_of_bounds(index: i64, length: usize) -> Self {
        Self::IndexOutOfBounds { index, length }
    }

    /// Creates an arity mismatch error.
    #[must_use]
    pub fn arity_mismatch(expected: impl Into<String>, actual: usize) -> Self {
        Self::ArityMismatch {
            expected: expected.into(),
            actual,
        }
    }
}
