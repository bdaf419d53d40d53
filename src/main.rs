//! Command-line interface for table-fuzzer
//!
//! # Usage Examples
//!
//! ## Live runs
//! ```bash
//! # Inline worker, generated seed
//! table-fuzzer run --ops 1000
//!
//! # Four workers against a memory table with a 1 MiB budget
//! table-fuzzer run --ops 5000 --workers 4 --table-memory 1048576
//!
//! # Only writes and reads, JSON report
//! table-fuzzer run --ops 5000 --include get,set --report json
//! ```
//!
//! ## Replay scripts
//! ```bash
//! table-fuzzer generate --ops 100 --workers 2 --seed 7 --output replay.rs
//! table-fuzzer replay replay.rs --op-timeout 0
//! ```

use clap::{Parser, Subcommand};
use table_fuzzer::commands::{run_fuzz, run_generate, run_replay};
use table_fuzzer::{init_logging, GenerateArgs, ReplayArgs, RunArgs};

#[derive(Parser)]
#[command(name = "table-fuzzer")]
#[command(about = "Deterministic fuzz testing for key/value table services")]
#[command(long_about = None)]
struct Cli {
    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info", env = "TABLE_FUZZER_LOG")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate commands and execute them against a table
    Run(RunArgs),

    /// Write the commands a run would execute as a replay script
    Generate(GenerateArgs),

    /// Execute a replay script against a table
    Replay(ReplayArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Run(args) => {
            run_fuzz(args).await?;
        }
        Commands::Generate(args) => {
            run_generate(args).await?;
        }
        Commands::Replay(args) => {
            run_replay(args).await?;
        }
    }

    Ok(())
}
