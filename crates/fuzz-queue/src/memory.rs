//! In-process queue.

use crate::error::QueueError;
use crate::Queue;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use tokio::sync::Mutex;

/// Named FIFO lists held in process memory.
#[derive(Debug, Default)]
pub struct MemoryQueue {
    lists: Mutex<HashMap<String, VecDeque<String>>>,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current length of the named list.
    pub async fn len(&self, name: &str) -> usize {
        self.lists.lock().await.get(name).map_or(0, VecDeque::len)
    }
}

#[async_trait]
impl Queue for MemoryQueue {
    async fn push(&self, name: &str, payload: String) -> Result<(), QueueError> {
        self.lists
            .lock()
            .await
            .entry(name.to_string())
            .or_default()
            .push_back(payload);
        Ok(())
    }

    async fn pop(&self, name: &str) -> Result<Option<String>, QueueError> {
        let mut lists = self.lists.lock().await;
        let Some(list) = lists.get_mut(name) else {
            return Ok(None);
        };
        let head = list.pop_front();
        if list.is_empty() {
            lists.remove(name);
        }
        Ok(head)
    }
}
