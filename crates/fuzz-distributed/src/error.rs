//! Coordinator errors.

use fuzz_core::ConfigError;
use fuzz_queue::QueueError;
use thiserror::Error;

/// Errors that abort a whole run.
///
/// Per-command failures never surface here; they are counted by the worker
/// that saw them.
#[derive(Error, Debug)]
pub enum CoordinatorError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid queue endpoint: {0}")]
    Endpoint(String),

    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    /// A worker task panicked or was cancelled.
    #[error("Worker {worker} failed: {reason}")]
    Worker { worker: u32, reason: String },

    #[error("Worker task failed: {0}")]
    Join(String),
}
