//! In-process namespaced table.

use crate::error::TableError;
use crate::table::{MemoryStats, Table};
use async_trait::async_trait;
use fuzz_core::Value;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    size: usize,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| at > now)
    }
}

#[derive(Debug, Default)]
struct State {
    namespaces: HashMap<String, HashMap<String, Entry>>,
    used: usize,
}

impl State {
    /// Look up a live entry, evicting it first if it has expired.
    fn live_entry(&mut self, key: &str, namespace: &str, now: Instant) -> Option<&Entry> {
        let entries = self.namespaces.get_mut(namespace)?;
        if entries.get(key).is_some_and(|e| !e.is_live(now)) {
            if let Some(expired) = entries.remove(key) {
                self.used -= expired.size;
            }
            return None;
        }
        entries.get(key)
    }

    fn purge_expired(&mut self, namespace: &str, now: Instant) {
        if let Some(entries) = self.namespaces.get_mut(namespace) {
            let mut freed = 0;
            entries.retain(|_, e| {
                let live = e.is_live(now);
                if !live {
                    freed += e.size;
                }
                live
            });
            self.used -= freed;
        }
    }

    fn remove(&mut self, key: &str, namespace: &str) -> Option<Entry> {
        let entries = self.namespaces.get_mut(namespace)?;
        let removed = entries.remove(key)?;
        self.used -= removed.size;
        Some(removed)
    }
}

/// Namespaced key/value table with per-entry expiry.
///
/// An optional byte budget turns oversized writes into
/// [`TableError::OutOfMemory`]; with a budget the table also reports
/// [`MemoryStats`].
#[derive(Debug, Default)]
pub struct MemoryTable {
    state: Mutex<State>,
    capacity: Option<usize>,
}

impl MemoryTable {
    /// Create an unbounded table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table that holds at most `capacity` bytes of keys and values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: Mutex::new(State::default()),
            capacity: Some(capacity),
        }
    }

    /// Bytes currently accounted to stored entries.
    pub async fn used(&self) -> usize {
        self.state.lock().await.used
    }
}

#[async_trait]
impl Table for MemoryTable {
    async fn get(&self, key: &str, namespace: &str) -> Result<Option<Value>, TableError> {
        let mut state = self.state.lock().await;
        Ok(state
            .live_entry(key, namespace, Instant::now())
            .map(|e| e.value.clone()))
    }

    async fn set(
        &self,
        key: &str,
        value: Value,
        expire: Option<u32>,
        namespace: &str,
    ) -> Result<(), TableError> {
        let now = Instant::now();
        let size = key.len() + value.size_hint();
        let mut state = self.state.lock().await;

        let replaced = state
            .namespaces
            .get(namespace)
            .and_then(|entries| entries.get(key))
            .map_or(0, |e| e.size);
        if let Some(capacity) = self.capacity {
            let available = capacity.saturating_sub(state.used - replaced);
            if size > available {
                return Err(TableError::OutOfMemory {
                    requested: size,
                    available,
                });
            }
        }

        let entry = Entry {
            value,
            size,
            expires_at: expire.map(|secs| now + Duration::from_secs(u64::from(secs))),
        };
        state.used = state.used - replaced + size;
        state
            .namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), entry);
        Ok(())
    }

    async fn exists(&self, key: &str, namespace: &str) -> Result<bool, TableError> {
        let mut state = self.state.lock().await;
        Ok(state.live_entry(key, namespace, Instant::now()).is_some())
    }

    async fn delete(&self, key: &str, namespace: &str) -> Result<bool, TableError> {
        let now = Instant::now();
        let mut state = self.state.lock().await;
        Ok(state
            .remove(key, namespace)
            .is_some_and(|removed| removed.is_live(now)))
    }

    async fn ttl(&self, key: &str, namespace: &str) -> Result<Option<i64>, TableError> {
        let now = Instant::now();
        let mut state = self.state.lock().await;
        Ok(state
            .live_entry(key, namespace, now)
            .and_then(|e| e.expires_at)
            .map(|at| {
                let remaining = at.saturating_duration_since(now);
                // Round up so a live entry never reports 0
                remaining.as_millis().div_ceil(1000) as i64
            }))
    }

    async fn count(&self, namespace: &str) -> Result<u64, TableError> {
        let mut state = self.state.lock().await;
        state.purge_expired(namespace, Instant::now());
        Ok(state
            .namespaces
            .get(namespace)
            .map_or(0, |entries| entries.len() as u64))
    }

    async fn clear(&self, namespace: &str) -> Result<(), TableError> {
        let mut state = self.state.lock().await;
        if let Some(entries) = state.namespaces.remove(namespace) {
            state.used -= entries.values().map(|e| e.size).sum::<usize>();
        }
        Ok(())
    }

    async fn namespaces(&self) -> Result<Vec<String>, TableError> {
        let now = Instant::now();
        let state = self.state.lock().await;
        let mut names: Vec<String> = state
            .namespaces
            .iter()
            .filter(|(_, entries)| entries.values().any(|e| e.is_live(now)))
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    async fn clear_all(&self) -> Result<(), TableError> {
        let mut state = self.state.lock().await;
        state.namespaces.clear();
        state.used = 0;
        Ok(())
    }

    async fn stats(&self) -> Option<MemoryStats> {
        let capacity = self.capacity?;
        let used = self.state.lock().await.used;
        Some(MemoryStats {
            used: used as u64,
            total: capacity as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuzz_core::{FieldMap, Scalar};

    const NS: &str = "namespace:0";

    fn int(v: i64) -> Value {
        Value::Scalar(Scalar::Int(v))
    }

    #[tokio::test]
    async fn test_set_get_exists_delete() {
        let table = MemoryTable::new();
        assert_eq!(table.get("key:0", NS).await.unwrap(), None);
        assert!(!table.exists("key:0", NS).await.unwrap());

        table.set("key:0", int(1), None, NS).await.unwrap();
        assert_eq!(table.get("key:0", NS).await.unwrap(), Some(int(1)));
        assert!(table.exists("key:0", NS).await.unwrap());
        assert_eq!(table.ttl("key:0", NS).await.unwrap(), None);

        assert!(table.delete("key:0", NS).await.unwrap());
        assert!(!table.delete("key:0", NS).await.unwrap());
        assert_eq!(table.used().await, 0);
    }

    #[tokio::test]
    async fn test_namespaces_are_isolated() {
        let table = MemoryTable::new();
        table.set("key:0", int(1), None, "namespace:0").await.unwrap();
        table.set("key:0", int(2), None, "namespace:1").await.unwrap();
        table.set("key:1", int(3), None, "namespace:1").await.unwrap();

        assert_eq!(table.count("namespace:0").await.unwrap(), 1);
        assert_eq!(table.count("namespace:1").await.unwrap(), 2);
        assert_eq!(
            table.namespaces().await.unwrap(),
            vec!["namespace:0".to_string(), "namespace:1".to_string()]
        );

        table.clear("namespace:1").await.unwrap();
        assert_eq!(table.count("namespace:1").await.unwrap(), 0);
        assert_eq!(table.get("key:0", "namespace:0").await.unwrap(), Some(int(1)));

        table.clear_all().await.unwrap();
        assert!(table.namespaces().await.unwrap().is_empty());
        assert_eq!(table.used().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry() {
        let table = MemoryTable::new();
        table.set("key:0", int(1), Some(10), NS).await.unwrap();
        assert_eq!(table.ttl("key:0", NS).await.unwrap(), Some(10));

        tokio::time::advance(Duration::from_millis(2500)).await;
        assert_eq!(table.ttl("key:0", NS).await.unwrap(), Some(8));
        assert!(table.exists("key:0", NS).await.unwrap());

        tokio::time::advance(Duration::from_secs(8)).await;
        assert!(!table.exists("key:0", NS).await.unwrap());
        assert_eq!(table.ttl("key:0", NS).await.unwrap(), None);
        assert_eq!(table.count(NS).await.unwrap(), 0);
        assert_eq!(table.used().await, 0);
    }

    #[tokio::test]
    async fn test_capacity_and_stats() {
        let table = MemoryTable::with_capacity(32);
        // "key:0" (5) + string (10) = 15 bytes
        let value = Value::Scalar(Scalar::Str("abcdefghij".into()));
        table.set("key:0", value.clone(), None, NS).await.unwrap();
        table.set("key:1", value.clone(), None, NS).await.unwrap();
        assert_eq!(
            table.stats().await,
            Some(MemoryStats {
                used: 30,
                total: 32
            })
        );

        let err = table.set("key:2", value.clone(), None, NS).await.unwrap_err();
        assert_eq!(
            err,
            TableError::OutOfMemory {
                requested: 15,
                available: 2
            }
        );

        // Overwriting an existing key reuses its space
        table.set("key:1", value, None, NS).await.unwrap();
        assert_eq!(table.used().await, 30);
    }

    #[tokio::test]
    async fn test_unbounded_table_has_no_stats() {
        let table = MemoryTable::new();
        let fields = FieldMap::from([("field:0", Scalar::Null)]);
        table.set("key:0", Value::Map(fields), None, NS).await.unwrap();
        assert_eq!(table.stats().await, None);
    }
}
