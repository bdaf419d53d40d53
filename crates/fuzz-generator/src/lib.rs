//! Deterministic command generator for the table-fuzzer.
//!
//! This crate turns a [`GenerationConfig`](fuzz_core::GenerationConfig) and a
//! seed into a reproducible stream of [`Command`](fuzz_core::Command)s. The
//! same (config, base seed, worker index, count) always yields the same
//! commands, whether they are executed live, pushed through a queue, or
//! written out as a replay script.
//!
//! # Architecture
//!
//! ```text
//! GenerationConfig + base seed + worker index
//!        │
//!        ▼  seed = base.wrapping_add(worker)
//! ┌─────────────────┐
//! │  RandomStream   │  SplitMix64 core, rand 0.8 bounded draws
//! └────────┬────────┘
//!          ▼
//! ┌──────────────────┐
//! │ CommandGenerator │  one draw sequence per command
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │  ReplaySequence  │  the only source of commands
//! └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use fuzz_core::{GenerationConfig, Op};
//! use fuzz_generator::ReplaySequence;
//!
//! let config = GenerationConfig::new(vec![Op::Get], 1, 1, 8, 2).unwrap();
//! let commands = ReplaySequence::new(&config, 42, 0, 3).build();
//! assert_eq!(commands.len(), 3);
//! assert!(commands.iter().all(|c| c.key() == Some("key:0")));
//! ```

pub mod generator;
pub mod generators;
pub mod sequence;
pub mod stream;

// Re-exports for convenience
pub use generator::{generate_command, CommandGenerator};
pub use sequence::{worker_seed, ReplaySequence};
pub use stream::RandomStream;
