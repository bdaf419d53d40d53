//! table-fuzzer library
//!
//! A fuzz-testing harness for key/value table services. Commands are
//! generated from a seeded stream, so any run can be repeated exactly from
//! its options and seed, either live or as a standalone replay script.
//!
//! # Crates
//!
//! - `fuzz_core` - commands, values and validated run options
//! - `fuzz_generator` - seeded random stream and replay sequences
//! - `fuzz_target` - the table capability trait and in-process tables
//! - `fuzz_queue` - queue transports for queue mode
//! - `fuzz_distributed` - worker coordination and run reports
//! - `fuzz_script` - replay script emission and parsing
//!
//! # CLI Usage
//!
//! ```bash
//! # Four workers, each with its own 10k-command sequence
//! table-fuzzer run --ops 10000 --workers 4 --seed 42
//!
//! # One producer fills a Redis list, four consumers drain it
//! table-fuzzer run --ops 10000 --workers 4 --mode queue --queue-endpoint 127.0.0.1:6379
//!
//! # Write the same commands as a replay script, then replay it
//! table-fuzzer generate --ops 10000 --workers 4 --seed 42 -o replay.rs
//! table-fuzzer replay replay.rs
//! ```

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{ExecutionArgs, GenerateArgs, GenerationArgs, ReplayArgs, RunArgs, TargetKind};

use tracing_subscriber::EnvFilter;

/// Initialize logging to stderr. `RUST_LOG` takes precedence over `level`.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // Ignore the error when a subscriber is already installed, as in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
