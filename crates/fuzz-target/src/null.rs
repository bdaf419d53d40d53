//! Table that stores nothing.

use crate::error::TableError;
use crate::table::Table;
use async_trait::async_trait;
use fuzz_core::Value;

/// Accepts every operation and returns empty results.
///
/// Useful for measuring the generator and coordinator without a real store.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTable;

#[async_trait]
impl Table for NullTable {
    async fn get(&self, _key: &str, _namespace: &str) -> Result<Option<Value>, TableError> {
        Ok(None)
    }

    async fn set(
        &self,
        _key: &str,
        _value: Value,
        _expire: Option<u32>,
        _namespace: &str,
    ) -> Result<(), TableError> {
        Ok(())
    }

    async fn exists(&self, _key: &str, _namespace: &str) -> Result<bool, TableError> {
        Ok(false)
    }

    async fn delete(&self, _key: &str, _namespace: &str) -> Result<bool, TableError> {
        Ok(false)
    }

    async fn ttl(&self, _key: &str, _namespace: &str) -> Result<Option<i64>, TableError> {
        Ok(None)
    }

    async fn count(&self, _namespace: &str) -> Result<u64, TableError> {
        Ok(0)
    }

    async fn clear(&self, _namespace: &str) -> Result<(), TableError> {
        Ok(())
    }

    async fn namespaces(&self) -> Result<Vec<String>, TableError> {
        Ok(Vec::new())
    }

    async fn clear_all(&self) -> Result<(), TableError> {
        Ok(())
    }
}
