//! Command-line arguments shared by the subcommands, and their conversion
//! into validated run options.

use crate::config::{format_duration, parse_duration};
use anyhow::Context;
use chrono::Utc;
use clap::{Args, ValueEnum};
use fuzz_core::{
    GenerationConfig, Mode, OpFilter, RunOptions, SeedSource, ALL_OPS, DEFAULT_QUEUE_ENDPOINT,
    DEFAULT_QUEUE_NAME,
};
use fuzz_distributed::ReportFormat;
use fuzz_target::{MemoryTable, NullTable, Table};
use std::path::PathBuf;
use std::sync::Arc;

/// Binary name used in rerun commands.
pub const BIN_NAME: &str = "table-fuzzer";

/// Options that decide which commands are generated.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct GenerationArgs {
    /// Commands per worker (random mode) or in total (queue mode)
    #[arg(long)]
    pub ops: u64,

    /// Worker tasks to spawn; 0 runs a single worker inline
    #[arg(long, default_value_t = 0)]
    pub workers: u32,

    /// Base seed (default: current time in nanoseconds)
    #[arg(long, env = "TABLE_FUZZER_SEED")]
    pub seed: Option<u64>,

    /// Number of distinct keys per namespace
    #[arg(long, default_value_t = 16)]
    pub keys: u32,

    /// Number of namespaces
    #[arg(long, default_value_t = 1)]
    pub namespaces: u32,

    /// Maximum length of generated strings
    #[arg(long, visible_alias = "max-key-size", default_value_t = 24)]
    pub max_string_len: u32,

    /// Maximum number of fields in a generated mapping
    #[arg(long, visible_alias = "max-mems", default_value_t = 4)]
    pub max_fields: u32,

    /// Only generate these operations (comma-separated)
    #[arg(long, value_name = "OPS")]
    pub include: Option<String>,

    /// Never generate these operations (comma-separated)
    #[arg(long, value_name = "OPS")]
    pub exclude: Option<String>,

    /// How commands reach workers: random or queue
    #[arg(long, default_value = "random")]
    pub mode: String,

    /// Queue server as host:port, or "memory" for an in-process queue
    #[arg(
        long,
        visible_alias = "redis",
        default_value = DEFAULT_QUEUE_ENDPOINT,
        env = "TABLE_FUZZER_QUEUE"
    )]
    pub queue_endpoint: String,

    /// Queue list name; the seed is appended to form the list key
    #[arg(long, visible_alias = "list", default_value = DEFAULT_QUEUE_NAME)]
    pub queue_name: String,
}

impl GenerationArgs {
    /// Validate the arguments into run options, resolving the seed.
    pub fn to_options(&self) -> anyhow::Result<RunOptions> {
        let filter = OpFilter::from_csl(
            self.include.as_deref().unwrap_or_default(),
            self.exclude.as_deref().unwrap_or_default(),
        );
        let ops = filter.apply()?;
        let generation = GenerationConfig::new(
            ops,
            self.keys,
            self.namespaces,
            self.max_string_len,
            self.max_fields,
        )?;
        let mode: Mode = self.mode.parse()?;
        let (seed, seed_source) = match self.seed {
            Some(seed) => (seed, SeedSource::Provided),
            None => (generated_seed(), SeedSource::Generated),
        };

        Ok(RunOptions::new(generation, self.ops, seed, seed_source)?
            .with_workers(self.workers)
            .with_mode(mode)
            .with_queue(self.queue_endpoint.clone(), self.queue_name.clone()))
    }
}

/// Seed from the wall clock, read once at startup.
fn generated_seed() -> u64 {
    Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64
}

/// Table implementation commands are sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TargetKind {
    /// In-process namespaced table with expiry
    #[default]
    Memory,
    /// Accepts everything and stores nothing
    Null,
}

/// Options that decide how commands are executed.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ExecutionArgs {
    /// Table to run commands against
    #[arg(long, value_enum, default_value_t = TargetKind::Memory)]
    pub target: TargetKind,

    /// Byte budget of the memory table; sets beyond it fail
    #[arg(long, value_name = "BYTES")]
    pub table_memory: Option<usize>,

    /// Time between worker status lines ("1", "0.5", "250ms", "2s")
    #[arg(long, default_value = "1s")]
    pub status_interval: String,

    /// Per-command deadline; "0" disables it
    #[arg(long, default_value = "10ms")]
    pub op_timeout: String,

    /// Report printed when the run finishes
    #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
    pub report: ReportFormat,
}

impl ExecutionArgs {
    /// Apply the timing options to `options`.
    pub fn apply(&self, options: RunOptions) -> anyhow::Result<RunOptions> {
        let status_interval = parse_duration(&self.status_interval)
            .context("Invalid --status-interval")?;
        let op_timeout = parse_duration(&self.op_timeout).context("Invalid --op-timeout")?;
        Ok(options
            .with_status_interval(status_interval)?
            .with_op_timeout(Some(op_timeout)))
    }

    pub fn build_table(&self) -> Arc<dyn Table> {
        match (self.target, self.table_memory) {
            (TargetKind::Memory, Some(bytes)) => Arc::new(MemoryTable::with_capacity(bytes)),
            (TargetKind::Memory, None) => Arc::new(MemoryTable::new()),
            (TargetKind::Null, _) => Arc::new(NullTable),
        }
    }

    fn rerun_args(&self, options: &RunOptions) -> Vec<String> {
        let mut args = vec![
            "--target".to_string(),
            value_name(self.target),
        ];
        if let Some(bytes) = self.table_memory {
            args.extend(["--table-memory".to_string(), bytes.to_string()]);
        }
        args.extend([
            "--status-interval".to_string(),
            format_duration(options.status_interval),
            "--op-timeout".to_string(),
            options
                .op_timeout
                .map_or_else(|| "0".to_string(), format_duration),
            "--report".to_string(),
            value_name(self.report),
        ]);
        args
    }
}

fn value_name<T: ValueEnum>(value: T) -> String {
    value
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}

/// Arguments for `run`.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct RunArgs {
    #[command(flatten)]
    pub generation: GenerationArgs,

    #[command(flatten)]
    pub exec: ExecutionArgs,
}

/// Arguments for `generate`.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub generation: GenerationArgs,

    /// Write the script here instead of stdout
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for `replay`.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ReplayArgs {
    /// Script written by `generate`
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    #[command(flatten)]
    pub exec: ExecutionArgs,
}

/// Flags that regenerate exactly the same commands as `options`.
pub fn generation_rerun_args(options: &RunOptions) -> Vec<String> {
    let g = &options.generation;
    let mut args = vec![
        "--ops".to_string(),
        options.ops.to_string(),
        "--workers".to_string(),
        options.workers.to_string(),
        "--seed".to_string(),
        options.seed.to_string(),
        "--keys".to_string(),
        g.key_space().to_string(),
        "--namespaces".to_string(),
        g.namespaces().to_string(),
        "--max-string-len".to_string(),
        g.max_string_len().to_string(),
        "--max-fields".to_string(),
        g.max_fields().to_string(),
    ];
    if g.ops() != ALL_OPS.as_slice() {
        let ops: Vec<&str> = g.ops().iter().map(|op| op.as_str()).collect();
        args.extend(["--include".to_string(), ops.join(",")]);
    }
    args.extend(["--mode".to_string(), options.mode.to_string()]);
    if options.mode == Mode::Queue {
        args.extend([
            "--queue-endpoint".to_string(),
            options.queue_endpoint.clone(),
            "--queue-name".to_string(),
            options.queue_name.clone(),
        ]);
    }
    args
}

/// Shell command that repeats a `run` with the same effective options.
pub fn run_rerun_command(options: &RunOptions, exec: &ExecutionArgs) -> String {
    let mut args = vec![BIN_NAME.to_string(), "run".to_string()];
    args.extend(generation_rerun_args(options));
    args.extend(exec.rerun_args(options));
    shell_join(&args)
}

/// Shell command that generates the same script as `options`.
pub fn generate_rerun_command(options: &RunOptions) -> String {
    let mut args = vec![BIN_NAME.to_string(), "generate".to_string()];
    args.extend(generation_rerun_args(options));
    shell_join(&args)
}

/// Join arguments into a POSIX shell command line.
pub fn shell_join(args: &[String]) -> String {
    args.iter()
        .map(|a| shell_quote(a))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quote `arg` for a POSIX shell if it needs it.
pub fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_.,:/=@%+".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
