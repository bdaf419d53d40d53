//! Core types for the table-fuzzer framework.
//!
//! This crate provides the foundational types shared by every other
//! crate in the workspace:
//!
//! - [`Op`] - The closed set of table operations the fuzzer can issue
//! - [`Command`] - One generated operation together with its operands
//! - [`Value`] - Values stored by `set` (scalars or one-level field maps)
//! - [`GenerationConfig`] - Validated generation parameters
//! - [`RunOptions`] - Everything a run needs, built once at startup
//!
//! # Architecture
//!
//! ```text
//! fuzz-core (this crate)
//!    │
//!    ├─── fuzz-generator    (seeded command streams)
//!    ├─── fuzz-target       (table capability surface)
//!    ├─── fuzz-queue        (queue transports + payload codec)
//!    ├─── fuzz-distributed  (worker coordination)
//!    └─── fuzz-script       (replay script emission)
//! ```
//!
//! # Example
//!
//! ```rust
//! use fuzz_core::{GenerationConfig, Op, OpFilter};
//!
//! let ops = OpFilter::new(vec!["get".into(), "set".into()], vec![])
//!     .apply()
//!     .unwrap();
//! assert_eq!(ops, vec![Op::Get, Op::Set]);
//!
//! let config = GenerationConfig::new(ops, 16, 1, 24, 4).unwrap();
//! assert_eq!(config.key_space(), 16);
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod op;
pub mod options;
pub mod value;

// Re-exports for convenience
pub use command::Command;
pub use config::{GenerationConfig, OpFilter};
pub use error::ConfigError;
pub use op::{Op, ALL_OPS};
pub use options::{
    Mode, RunOptions, SeedSource, DEFAULT_QUEUE_ENDPOINT, DEFAULT_QUEUE_NAME, PRODUCER_INDEX,
};
pub use value::{FieldMap, Scalar, Value};
