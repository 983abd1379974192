//! Error types for Gaussian elimination.
//!
//! Library code never exits the process: every failure is returned as a
//! [`GaussError`] and the binary maps it to an exit code with
//! [`GaussError::exit_code`].

use thiserror::Error;

/// Errors that can occur while building or eliminating a linear system.
#[derive(Debug, Error)]
pub enum GaussError {
    /// No nonzero pivot candidate exists in the active column.
    #[error("The matrix is singular")]
    SingularMatrix {
        /// Column (elimination step) in which no pivot was found
        column: usize,
    },

    /// A system must have at least one row.
    #[error("matrix dimension must be at least 1")]
    EmptySystem,

    /// The coefficient matrix is not square.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },

    /// Right-hand side length does not match the matrix dimension.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Matrix dimension
        expected: usize,
        /// Length that was provided
        got: usize,
    },

    /// The worker pool needs at least one worker.
    #[error("invalid worker count: {0} (must be >= 1)")]
    InvalidWorkerCount(usize),

    /// The underlying thread pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// A specialized `Result` type for elimination operations.
pub type Result<T> = std::result::Result<T, GaussError>;

/// Exit code for a singular matrix.
pub const EXIT_SINGULAR: i32 = 3;

/// Exit code for any other fatal error.
pub const EXIT_FAILURE: i32 = 1;

impl GaussError {
    /// Returns `true` if elimination stopped on a singular matrix.
    pub fn is_singular(&self) -> bool {
        matches!(self, GaussError::SingularMatrix { .. })
    }

    /// Returns `true` if the error comes from invalid input dimensions.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            GaussError::EmptySystem
                | GaussError::NotSquare { .. }
                | GaussError::DimensionMismatch { .. }
        )
    }

    /// Process exit code reported by the command-line driver.
    pub fn exit_code(&self) -> i32 {
        if self.is_singular() {
            EXIT_SINGULAR
        } else {
            EXIT_FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singular_message_and_code() {
        let err = GaussError::SingularMatrix { column: 4 };
        assert_eq!(err.to_string(), "The matrix is singular");
        assert!(err.is_singular());
        assert!(!err.is_shape_error());
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_shape_errors() {
        let err = GaussError::NotSquare { rows: 2, cols: 3 };
        assert!(err.is_shape_error());
        assert_eq!(err.to_string(), "matrix is not square: 2x3");
        assert_eq!(err.exit_code(), EXIT_FAILURE);

        let err = GaussError::DimensionMismatch {
            expected: 3,
            got: 2,
        };
        assert!(err.is_shape_error());
        assert_eq!(err.to_string(), "dimension mismatch: expected 3, got 2");
    }
}
