//! `run` command handler.

use crate::cli::{run_rerun_command, RunArgs};
use anyhow::Context;
use fuzz_distributed::{Coordinator, RunReport};
use tracing::info;

/// Run the fuzzer against the selected table.
pub async fn run_fuzz(args: RunArgs) -> anyhow::Result<RunReport> {
    let options = args.exec.apply(args.generation.to_options()?)?;

    info!("Seed: {} ({})", options.seed, options.seed_source);
    info!("Rerun: {}", run_rerun_command(&options, &args.exec));
    info!(
        "Mode: {}, workers: {}, ops: {}, operations: {:?}",
        options.mode,
        options.workers,
        options.ops,
        options.generation.ops()
    );

    let table = args.exec.build_table();
    let report = Coordinator::new(options, table)
        .run()
        .await
        .context("Fuzz run failed")?;

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
