//! Per-worker execution loops.
//!
//! A worker sends commands to the table one at a time, in order. A failing
//! command is logged and counted, then the worker moves on; only queue
//! transport errors end a worker early.

use crate::metrics::WorkerMetrics;
use crate::progress::{done_line, Progress};
use fuzz_core::Command;
use fuzz_queue::{decode_command, Queue, QueueError};
use fuzz_target::{execute, Table};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Knobs shared by every worker of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerSettings {
    pub op_timeout: Option<Duration>,
    pub status_interval: Duration,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            op_timeout: None,
            status_interval: Duration::from_secs(1),
        }
    }
}

struct WorkerRun<'a> {
    table: &'a dyn Table,
    settings: WorkerSettings,
    progress: Progress,
    metrics: WorkerMetrics,
    start: Instant,
}

impl<'a> WorkerRun<'a> {
    fn new(worker: u32, total: u64, table: &'a dyn Table, settings: WorkerSettings) -> Self {
        Self {
            table,
            settings,
            progress: Progress::new(worker, total, settings.status_interval),
            metrics: WorkerMetrics::new(worker),
            start: Instant::now(),
        }
    }

    async fn step(&mut self, command: &Command) {
        let worker = self.metrics.worker;
        debug!(worker, command = %command, "Executing command");

        if let Err(e) = execute(self.table, command, self.settings.op_timeout).await {
            self.metrics.failed += 1;
            warn!(worker, command = ?command, "worker {worker} error: {e}");
        }
        self.metrics.executed += 1;

        if let Some(line) = self.progress.poll(self.metrics.executed, self.table).await {
            println!("{line}");
        }
    }

    fn finish(mut self) -> WorkerMetrics {
        self.metrics.elapsed_secs = self.start.elapsed().as_secs_f64();
        println!("{}", done_line(&self.metrics));
        self.metrics
    }
}

/// Run a pre-determined command sequence against the table.
pub async fn run_sequence_worker<I>(
    worker: u32,
    commands: I,
    table: &dyn Table,
    settings: WorkerSettings,
) -> WorkerMetrics
where
    I: IntoIterator<Item = Command>,
    I::IntoIter: ExactSizeIterator,
{
    let commands = commands.into_iter();
    let mut run = WorkerRun::new(worker, commands.len() as u64, table, settings);
    for command in commands {
        run.step(&command).await;
    }
    run.finish()
}

/// Drain `queue_key` until it is empty, executing every decodable payload.
///
/// `total` is only used for progress percentages.
pub async fn run_queue_worker(
    worker: u32,
    queue: &dyn Queue,
    queue_key: &str,
    total: u64,
    table: &dyn Table,
    settings: WorkerSettings,
) -> Result<WorkerMetrics, QueueError> {
    let mut run = WorkerRun::new(worker, total, table, settings);
    while let Some(payload) = queue.pop(queue_key).await? {
        match decode_command(&payload) {
            Some(command) => run.step(&command).await,
            None => run.metrics.skipped += 1,
        }
    }
    Ok(run.finish())
}
