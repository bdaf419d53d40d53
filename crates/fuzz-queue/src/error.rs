//! Error types for queue transports.

use thiserror::Error;

/// Errors raised by a queue transport.
///
/// These are infrastructure errors and abort the run.
#[derive(Error, Debug)]
pub enum QueueError {
    /// Could not reach the queue server.
    #[error("Failed to connect to queue at {endpoint}: {reason}")]
    Connect { endpoint: String, reason: String },

    /// IO error on an established connection.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The server replied with an error or something unparseable.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A command could not be encoded into a payload.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
