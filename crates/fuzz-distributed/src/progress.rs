//! Worker status lines.

use crate::metrics::WorkerMetrics;
use fuzz_target::{MemoryStats, Table};
use std::time::Duration;
use tokio::time::Instant;

/// Percentage complete, clamped to `[0, 100]`.
pub fn progress_percent(done: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (done as f64 / total as f64 * 100.0).min(100.0)
}

/// Periodic status line, with the table's memory usage when it reports any.
pub fn status_line(worker: u32, done: u64, total: u64, stats: Option<MemoryStats>) -> String {
    let mut line = format!(
        "worker {worker}: {:.2}% {done}/{total} commands executed",
        progress_percent(done, total)
    );
    if let Some(stats) = stats {
        line.push(' ');
        line.push_str(&stats.to_string());
    }
    line
}

/// Final line printed by each worker.
pub fn done_line(metrics: &WorkerMetrics) -> String {
    format!(
        "worker {} done: {} commands in {:.2}s ({:.1} ops/s)",
        metrics.worker,
        metrics.executed,
        metrics.elapsed_secs,
        metrics.ops_per_second()
    )
}

/// Rate limiter for status lines, measured on wall-clock time since the
/// previous line.
#[derive(Debug)]
pub struct Progress {
    worker: u32,
    total: u64,
    interval: Duration,
    last_report: Instant,
}

impl Progress {
    pub fn new(worker: u32, total: u64, interval: Duration) -> Self {
        Self {
            worker,
            total,
            interval,
            last_report: Instant::now(),
        }
    }

    /// Status line for `done`, if the interval has elapsed since the last one.
    pub async fn poll(&mut self, done: u64, table: &dyn Table) -> Option<String> {
        if self.last_report.elapsed() < self.interval {
            return None;
        }
        self.last_report = Instant::now();
        let stats = table.stats().await;
        Some(status_line(self.worker, done, self.total, stats))
    }
}
