//! Replay scripts for table-fuzzer.
//!
//! A replay script is a standalone Rust program that makes exactly the table
//! calls a live run with the same options would make, in the same order. It
//! is produced from the same [`ReplaySequence`](fuzz_generator::ReplaySequence)
//! the live workers consume, so a failing run can be reproduced without the
//! generator or a queue.
//!
//! ```
//! use fuzz_core::{GenerationConfig, Op, RunOptions, SeedSource};
//! use fuzz_script::{parse_script, ScriptEmitter};
//!
//! let generation = GenerationConfig::new(vec![Op::Set], 4, 1, 8, 2).unwrap();
//! let options = RunOptions::new(generation, 10, 7, SeedSource::Provided).unwrap();
//!
//! let script = ScriptEmitter::new(&options).emit();
//! let parsed = parse_script(&script).unwrap();
//! assert_eq!(parsed.total_commands(), 10);
//! assert_eq!(parsed.seed, Some(7));
//! ```

pub mod emit;
pub mod error;
pub mod literal;
pub mod parse;

pub use emit::{encode_call, ScriptEmitter};
pub use error::{LiteralError, ScriptError};
pub use literal::{encode_scalar, encode_str, encode_value, parse_scalar, parse_value};
pub use parse::{parse_call, parse_script, ParsedScript, ScriptSequence};
