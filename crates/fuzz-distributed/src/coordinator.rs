//! Run coordination.
//!
//! Random mode gives every worker its own [`ReplaySequence`] seeded with
//! `seed + worker`. Queue mode has one producer push the sequence for
//! [`PRODUCER_INDEX`] onto a shared list that every worker drains.
//!
//! A worker count of 0 runs one worker inline on the calling task.

use crate::error::CoordinatorError;
use crate::metrics::{RunReport, WorkerMetrics};
use crate::worker::{run_queue_worker, run_sequence_worker, WorkerSettings};
use chrono::Utc;
use fuzz_core::{Mode, RunOptions, PRODUCER_INDEX};
use fuzz_generator::ReplaySequence;
use fuzz_queue::{encode_command, Queue, QueueEndpoint, QueueError};
use fuzz_target::Table;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{error, info};

type WorkerResult = Result<WorkerMetrics, CoordinatorError>;

/// Push the producer's whole sequence onto `queue_key`, in generation order.
///
/// Returns the number of payloads pushed.
pub async fn produce(
    options: &RunOptions,
    queue: &dyn Queue,
    queue_key: &str,
) -> Result<u64, QueueError> {
    let sequence = ReplaySequence::new(&options.generation, options.seed, PRODUCER_INDEX, options.ops);
    let mut pushed = 0u64;
    for command in &sequence {
        queue.push(queue_key, encode_command(&command)?).await?;
        pushed += 1;
    }
    Ok(pushed)
}

/// Spawns, drives and joins the workers of one run.
pub struct Coordinator {
    options: Arc<RunOptions>,
    table: Arc<dyn Table>,
    queue: Option<Arc<dyn Queue>>,
}

impl Coordinator {
    pub fn new(options: RunOptions, table: Arc<dyn Table>) -> Self {
        Self {
            options: Arc::new(options),
            table,
            queue: None,
        }
    }

    /// Use `queue` instead of connecting to `options.queue_endpoint`.
    pub fn with_queue(mut self, queue: Arc<dyn Queue>) -> Self {
        self.queue = Some(queue);
        self
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    fn settings(&self) -> WorkerSettings {
        WorkerSettings {
            op_timeout: self.options.op_timeout,
            status_interval: self.options.status_interval,
        }
    }

    /// Execute the run and wait for every worker.
    ///
    /// Returns an error only for infrastructure failures; those are reported
    /// after all remaining workers have been joined.
    pub async fn run(&self) -> Result<RunReport, CoordinatorError> {
        let started_at = Utc::now();
        let start = Instant::now();
        info!(
            mode = %self.options.mode,
            seed = self.options.seed,
            workers = self.options.workers,
            ops = self.options.ops,
            "Starting run"
        );

        let workers = match self.options.mode {
            Mode::Random => self.run_random().await?,
            Mode::Queue => self.run_queue().await?,
        };

        if self.options.workers > 0 {
            println!("All workers completed.");
        }

        let report = RunReport::new(&self.options, workers, start.elapsed(), started_at);
        info!(
            executed = report.total_executed,
            failed = report.total_failed,
            skipped = report.total_skipped,
            "Run finished in {:.2}s",
            report.wall_clock_secs
        );
        Ok(report)
    }

    async fn run_random(&self) -> Result<Vec<WorkerMetrics>, CoordinatorError> {
        let options = &self.options;
        let settings = self.settings();

        if options.workers == 0 {
            let sequence = ReplaySequence::new(&options.generation, options.seed, 0, options.ops);
            let metrics = run_sequence_worker(0, sequence.iter(), &*self.table, settings).await;
            return Ok(vec![metrics]);
        }

        let mut set: JoinSet<WorkerResult> = JoinSet::new();
        for worker in 0..options.workers {
            let commands =
                ReplaySequence::new(&options.generation, options.seed, worker, options.ops).iter();
            let table = Arc::clone(&self.table);
            set.spawn(async move {
                Ok(run_sequence_worker(worker, commands, &*table, settings).await)
            });
        }
        join_workers(set).await
    }

    async fn run_queue(&self) -> Result<Vec<WorkerMetrics>, CoordinatorError> {
        let options = &self.options;
        let settings = self.settings();
        let queue = self.connect_queue().await?;
        let queue_key = options.queue_key();

        let pushed = produce(options, &*queue, &queue_key).await?;
        info!("Pushed {pushed} commands to queue {queue_key}");

        if options.workers == 0 {
            let metrics =
                run_queue_worker(0, &*queue, &queue_key, options.ops, &*self.table, settings)
                    .await?;
            return Ok(vec![metrics]);
        }

        let mut set: JoinSet<WorkerResult> = JoinSet::new();
        for worker in 0..options.workers {
            let queue = Arc::clone(&queue);
            let table = Arc::clone(&self.table);
            let queue_key = queue_key.clone();
            let total = options.ops;
            set.spawn(async move {
                run_queue_worker(worker, &*queue, &queue_key, total, &*table, settings)
                    .await
                    .map_err(|e| CoordinatorError::Worker {
                        worker,
                        reason: e.to_string(),
                    })
            });
        }
        join_workers(set).await
    }

    async fn connect_queue(&self) -> Result<Arc<dyn Queue>, CoordinatorError> {
        if let Some(queue) = &self.queue {
            return Ok(Arc::clone(queue));
        }
        let endpoint: QueueEndpoint = self
            .options
            .queue_endpoint
            .parse()
            .map_err(CoordinatorError::Endpoint)?;
        info!("Connecting to queue at {endpoint}");
        Ok(fuzz_queue::connect(&endpoint).await?)
    }
}

/// Join every worker, keeping the first failure until all have finished.
async fn join_workers(mut set: JoinSet<WorkerResult>) -> Result<Vec<WorkerMetrics>, CoordinatorError> {
    let mut workers = Vec::with_capacity(set.len());
    let mut first_error = None;

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(Ok(metrics)) => workers.push(metrics),
            Ok(Err(e)) => {
                error!("{e}");
                first_error.get_or_insert(e);
            }
            Err(e) => {
                error!("Worker task failed: {e}");
                first_error.get_or_insert(CoordinatorError::Join(e.to_string()));
            }
        }
    }

    if let Some(e) = first_error {
        return Err(e);
    }
    workers.sort_by_key(|m| m.worker);
    Ok(workers)
}
