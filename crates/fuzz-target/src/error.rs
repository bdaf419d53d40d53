//! Error types for table operations.

use thiserror::Error;

/// Errors a table may return for a single operation.
///
/// These are per-operation errors: a worker logs them and moves on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// The write would exceed the table's memory budget.
    #[error("Out of memory: {requested} bytes requested, {available} available")]
    OutOfMemory { requested: usize, available: usize },

    /// The operation did not complete within the configured deadline.
    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),
}
