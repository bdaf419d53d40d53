//! `replay` command handler.

use crate::cli::ReplayArgs;
use crate::config::parse_duration;
use anyhow::Context;
use chrono::Utc;
use fuzz_core::Mode;
use fuzz_distributed::{run_sequence_worker, RunReport, WorkerMetrics, WorkerSettings};
use fuzz_script::parse_script;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::info;

/// Re-execute a previously generated script against the selected table.
pub async fn run_replay(args: ReplayArgs) -> anyhow::Result<RunReport> {
    let source = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script: {:?}", args.script))?;
    let script = parse_script(&source)
        .with_context(|| format!("Failed to parse script: {:?}", args.script))?;

    let status_interval =
        parse_duration(&args.exec.status_interval).context("Invalid --status-interval")?;
    if status_interval.is_zero() {
        anyhow::bail!("Invalid --status-interval value: {}", args.exec.status_interval);
    }
    let op_timeout = parse_duration(&args.exec.op_timeout).context("Invalid --op-timeout")?;
    let settings = WorkerSettings {
        op_timeout: Some(op_timeout).filter(|t| !t.is_zero()),
        status_interval,
    };

    info!(
        "Replaying {} commands in {} sequence(s) from {:?}",
        script.total_commands(),
        script.sequences.len(),
        args.script
    );

    let table = args.exec.build_table();
    let started_at = Utc::now();
    let start = Instant::now();

    let workers: Vec<WorkerMetrics> = if script.is_per_worker() {
        let mut set = JoinSet::new();
        for sequence in script.sequences.iter().cloned() {
            let table = table.clone();
            let worker = sequence.worker.unwrap_or_default();
            set.spawn(async move {
                run_sequence_worker(worker, sequence.commands, &*table, settings).await
            });
        }
        let mut workers = Vec::with_capacity(set.len());
        while let Some(joined) = set.join_next().await {
            workers.push(joined.context("Replay worker failed")?);
        }
        println!("All workers completed.");
        workers.sort_by_key(|m| m.worker);
        workers
    } else {
        let commands = script
            .sequences
            .iter()
            .flat_map(|s| s.commands.iter().cloned())
            .collect::<Vec<_>>();
        vec![run_sequence_worker(0, commands, &*table, settings).await]
    };

    let report = RunReport::from_parts(
        script.mode.unwrap_or(Mode::Random),
        script.seed.unwrap_or_default(),
        script.workers.unwrap_or_default(),
        workers,
        start.elapsed(),
        started_at,
    );

    if let Some(rendered) = args
        .exec
        .report
        .render(&report)
        .context("Failed to render run report")?
    {
        println!("{rendered}");
    }
    Ok(report)
}
