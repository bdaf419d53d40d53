//! The table trait.

use crate::error::TableError;
use async_trait::async_trait;
use fuzz_core::Value;

/// Memory usage reported by a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryStats {
    pub used: u64,
    pub total: u64,
}

impl std::fmt::Display for MemoryStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mem {}/{}", self.used, self.total)
    }
}

/// A key/value table partitioned into namespaces.
///
/// Implementations must be shareable across worker tasks. Concurrent writes
/// to the same key from different workers are expected; the fuzzer does not
/// synchronize them.
#[async_trait]
pub trait Table: Send + Sync {
    async fn get(&self, key: &str, namespace: &str) -> Result<Option<Value>, TableError>;

    async fn set(
        &self,
        key: &str,
        value: Value,
        expire: Option<u32>,
        namespace: &str,
    ) -> Result<(), TableError>;

    async fn exists(&self, key: &str, namespace: &str) -> Result<bool, TableError>;

    async fn delete(&self, key: &str, namespace: &str) -> Result<bool, TableError>;

    /// Remaining lifetime in seconds, `None` for missing keys and keys without expiry.
    async fn ttl(&self, key: &str, namespace: &str) -> Result<Option<i64>, TableError>;

    async fn count(&self, namespace: &str) -> Result<u64, TableError>;

    async fn clear(&self, namespace: &str) -> Result<(), TableError>;

    async fn namespaces(&self) -> Result<Vec<String>, TableError>;

    async fn clear_all(&self) -> Result<(), TableError>;

    /// Best-effort memory usage probe. Tables without one return `None`.
    async fn stats(&self) -> Option<MemoryStats> {
        None
    }
}
