//! Metrics types for worker output and aggregation.

use chrono::{DateTime, Utc};
use fuzz_core::{Mode, RunOptions};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What a single worker did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerMetrics {
    /// Worker index
    pub worker: u32,
    /// Commands sent to the table, failed ones included
    pub executed: u64,
    /// Commands the table rejected or that timed out
    pub failed: u64,
    /// Queue payloads that did not decode into a command
    pub skipped: u64,
    /// Time from first to last command, in seconds
    pub elapsed_secs: f64,
}

impl WorkerMetrics {
    pub fn new(worker: u32) -> Self {
        Self {
            worker,
            executed: 0,
            failed: 0,
            skipped: 0,
            elapsed_secs: 0.0,
        }
    }

    /// Executed commands per second, 0 if no time elapsed.
    pub fn ops_per_second(&self) -> f64 {
        if self.elapsed_secs > 0.0 {
            self.executed as f64 / self.elapsed_secs
        } else {
            0.0
        }
    }
}

/// Aggregated result of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub mode: Mode,
    pub seed: u64,
    /// Requested worker count (0 = inline)
    pub requested_workers: u32,
    pub total_executed: u64,
    pub total_failed: u64,
    pub total_skipped: u64,
    pub wall_clock_secs: f64,
    /// Sum of worker throughputs
    pub aggregate_ops_per_second: f64,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub workers: Vec<WorkerMetrics>,
}

impl RunReport {
    pub fn new(
        options: &RunOptions,
        workers: Vec<WorkerMetrics>,
        wall_clock: Duration,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self::from_parts(
            options.mode,
            options.seed,
            options.workers,
            workers,
            wall_clock,
            started_at,
        )
    }

    /// Build a report for runs that have no [`RunOptions`], such as replays.
    pub fn from_parts(
        mode: Mode,
        seed: u64,
        requested_workers: u32,
        workers: Vec<WorkerMetrics>,
        wall_clock: Duration,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            mode,
            seed,
            requested_workers,
            total_executed: workers.iter().map(|w| w.executed).sum(),
            total_failed: workers.iter().map(|w| w.failed).sum(),
            total_skipped: workers.iter().map(|w| w.skipped).sum(),
            wall_clock_secs: wall_clock.as_secs_f64(),
            aggregate_ops_per_second: workers.iter().map(WorkerMetrics::ops_per_second).sum(),
            started_at,
            completed_at: Utc::now(),
            workers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuzz_core::{GenerationConfig, OpFilter, SeedSource};

    fn options() -> RunOptions {
        let ops = OpFilter::default().apply().unwrap();
        let generation = GenerationConfig::new(ops, 16, 1, 24, 4).unwrap();
        RunOptions::new(generation, 10, 7, SeedSource::Provided)
            .unwrap()
            .with_workers(2)
    }

    fn metrics(worker: u32, executed: u64, failed: u64, elapsed_secs: f64) -> WorkerMetrics {
        WorkerMetrics {
            worker,
            executed,
            failed,
            skipped: 0,
            elapsed_secs,
        }
    }

    #[test]
    fn test_ops_per_second() {
        assert_eq!(metrics(0, 100, 0, 2.0).ops_per_second(), 50.0);
        assert_eq!(metrics(0, 100, 0, 0.0).ops_per_second(), 0.0);
    }

    #[test]
    fn test_report_totals() {
        let report = RunReport::new(
            &options(),
            vec![metrics(0, 10, 1, 1.0), metrics(1, 10, 2, 2.0)],
            Duration::from_secs(2),
            Utc::now(),
        );
        assert_eq!(report.total_executed, 20);
        assert_eq!(report.total_failed, 3);
        assert_eq!(report.aggregate_ops_per_second, 15.0);
        assert_eq!(report.wall_clock_secs, 2.0);
        assert_eq!(report.requested_workers, 2);
        assert_eq!(report.seed, 7);
    }
}
