//! Queue transports for queue mode.
//!
//! The queue is an opaque FIFO list identified by name that supports
//! push-one and pop-one-or-empty. Payloads are JSON-encoded commands.
//!
//! - [`MemoryQueue`] - in-process lists, for single-process runs and tests
//! - [`RedisQueue`] - Redis lists over RESP (`RPUSH` / `LPOP`)
//!
//! [`connect`] picks the transport from a [`QueueEndpoint`].

pub mod codec;
pub mod endpoint;
pub mod error;
pub mod memory;
pub mod redis;

use async_trait::async_trait;
use std::sync::Arc;

pub use codec::{decode_command, encode_command};
pub use endpoint::QueueEndpoint;
pub use error::QueueError;
pub use memory::MemoryQueue;
pub use redis::RedisQueue;

/// A named FIFO list transport.
#[async_trait]
pub trait Queue: Send + Sync {
    /// Append a payload to the tail of the named list.
    async fn push(&self, name: &str, payload: String) -> Result<(), QueueError>;

    /// Remove and return the head of the named list, `None` when it is empty.
    async fn pop(&self, name: &str) -> Result<Option<String>, QueueError>;
}

/// Connect to the queue described by `endpoint`.
pub async fn connect(endpoint: &QueueEndpoint) -> Result<Arc<dyn Queue>, QueueError> {
    match endpoint {
        QueueEndpoint::Memory => Ok(Arc::new(MemoryQueue::new())),
        QueueEndpoint::Redis { host, port } => {
            Ok(Arc::new(RedisQueue::connect(host, *port).await?))
        }
    }
}
