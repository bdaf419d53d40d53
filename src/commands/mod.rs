//! Subcommand handlers.

pub mod generate;
pub mod replay;
pub mod run;

pub use generate::run_generate;
pub use replay::run_replay;
pub use run::run_fuzz;
