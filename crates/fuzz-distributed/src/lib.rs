//! Worker coordination for table-fuzzer.
//!
//! ## Architecture
//!
//! ```text
//!                      ┌──────────────────────┐
//!                      │     Coordinator      │
//!                      │  (RunOptions, Table) │
//!                      └──────────┬───────────┘
//!                  random mode    │    queue mode
//!            ┌────────────────────┴─────────────────────┐
//!            ▼                                          ▼
//!  ┌───────────────────┐                      ┌───────────────────┐
//!  │ ReplaySequence    │                      │ producer          │
//!  │ (seed + worker)   │                      │ (seed, one list)  │
//!  └─────────┬─────────┘                      └─────────┬─────────┘
//!            │ one per worker                           │ RPUSH
//!            ▼                                          ▼
//!  ┌───────────────────┐                      ┌───────────────────┐
//!  │ worker 0..N       │                      │ Queue             │
//!  └─────────┬─────────┘                      └─────────┬─────────┘
//!            │                                          │ LPOP until empty
//!            │                                          ▼
//!            │                                ┌───────────────────┐
//!            │                                │ consumer 0..N     │
//!            │                                └─────────┬─────────┘
//!            └──────────────────┬───────────────────────┘
//!                               ▼
//!                     ┌───────────────────┐
//!                     │ Table             │
//!                     └───────────────────┘
//! ```
//!
//! Each worker prints periodic status lines and a final summary line to
//! stdout. Per-command failures are logged through `tracing` and never stop a
//! worker. The coordinator joins every worker and returns a [`RunReport`].

pub mod coordinator;
pub mod error;
pub mod metrics;
pub mod progress;
pub mod report;
pub mod worker;

pub use coordinator::{produce, Coordinator};
pub use error::CoordinatorError;
pub use metrics::{RunReport, WorkerMetrics};
pub use progress::{done_line, progress_percent, status_line, Progress};
pub use report::{format_json, format_table, ReportFormat};
pub use worker::{run_queue_worker, run_sequence_worker, WorkerSettings};
