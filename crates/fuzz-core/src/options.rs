//! Run options shared read-only by every component of a run.

use crate::config::GenerationConfig;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Worker index whose seed the queue-mode producer uses.
///
/// There is exactly one producer, so its sequence is seeded with the base
/// seed itself.
pub const PRODUCER_INDEX: u32 = 0;

/// How commands reach the workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Each worker generates its own sequence from `seed + worker`.
    Random,
    /// One producer fills a shared queue that every worker drains.
    Queue,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Random => write!(f, "random"),
            Mode::Queue => write!(f, "queue"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(Mode::Random),
            "queue" => Ok(Mode::Queue),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

/// Where the base seed came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedSource {
    Provided,
    Generated,
}

impl std::fmt::Display for SeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedSource::Provided => write!(f, "provided"),
            SeedSource::Generated => write!(f, "generated"),
        }
    }
}

/// Default queue endpoint.
pub const DEFAULT_QUEUE_ENDPOINT: &str = "127.0.0.1:6379";
/// Default queue name prefix.
pub const DEFAULT_QUEUE_NAME: &str = "table-fuzzer";

/// Everything a run needs. Built once, then shared by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOptions {
    pub generation: GenerationConfig,
    /// Commands per worker (random mode) or in total (queue mode)
    pub ops: u64,
    /// Worker count; 0 runs a single inline worker
    pub workers: u32,
    pub seed: u64,
    pub seed_source: SeedSource,
    pub mode: Mode,
    pub queue_endpoint: String,
    pub queue_name: String,
    pub status_interval: Duration,
    /// Per-command deadline; an elapsed deadline counts as a failed command
    pub op_timeout: Option<Duration>,
}

impl RunOptions {
    pub fn new(
        generation: GenerationConfig,
        ops: u64,
        seed: u64,
        seed_source: SeedSource,
    ) -> Result<Self, ConfigError> {
        if ops == 0 {
            return Err(ConfigError::invalid("ops", ops));
        }
        Ok(Self {
            generation,
            ops,
            workers: 0,
            seed,
            seed_source,
            mode: Mode::Random,
            queue_endpoint: DEFAULT_QUEUE_ENDPOINT.to_string(),
            queue_name: DEFAULT_QUEUE_NAME.to_string(),
            status_interval: Duration::from_secs(1),
            op_timeout: None,
        })
    }

    pub fn with_workers(mut self, workers: u32) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_queue(mut self, endpoint: impl Into<String>, name: impl Into<String>) -> Self {
        self.queue_endpoint = endpoint.into();
        self.queue_name = name.into();
        self
    }

    pub fn with_status_interval(mut self, interval: Duration) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::invalid(
                "status-interval",
                format!("{interval:?}"),
            ));
        }
        self.status_interval = interval;
        Ok(self)
    }

    pub fn with_op_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.op_timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    /// Number of worker tasks actually started (an inline worker counts as one).
    pub fn effective_workers(&self) -> u32 {
        self.workers.max(1)
    }

    /// Queue list name, scoped by seed so runs with different seeds never mix.
    pub fn queue_key(&self) -> String {
        format!("{}:{}", self.queue_name, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::Op;

    fn generation() -> GenerationConfig {
        GenerationConfig::new(vec![Op::Get], 1, 1, 1, 1).unwrap()
    }

    #[test]
    fn test_zero_ops_rejected() {
        assert!(RunOptions::new(generation(), 0, 1, SeedSource::Provided).is_err());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("random".parse::<Mode>().unwrap(), Mode::Random);
        assert_eq!("QUEUE".parse::<Mode>().unwrap(), Mode::Queue);
        assert_eq!(
            "fork".parse::<Mode>(),
            Err(ConfigError::UnknownMode("fork".to_string()))
        );
    }

    #[test]
    fn test_zero_status_interval_rejected() {
        let options = RunOptions::new(generation(), 1, 1, SeedSource::Provided).unwrap();
        assert!(options.with_status_interval(Duration::ZERO).is_err());
    }

    #[test]
    fn test_queue_key_and_workers() {
        let options = RunOptions::new(generation(), 5, 42, SeedSource::Provided)
            .unwrap()
            .with_queue("memory", "fuzz");
        assert_eq!(options.queue_key(), "fuzz:42");
        assert_eq!(options.effective_workers(), 1);
        assert_eq!(options.with_workers(4).effective_workers(), 4);
    }

    #[test]
    fn test_zero_op_timeout_disables() {
        let options = RunOptions::new(generation(), 1, 1, SeedSource::Provided)
            .unwrap()
            .with_op_timeout(Some(Duration::ZERO));
        assert_eq!(options.op_timeout, None);
    }
}
