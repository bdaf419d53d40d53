//! Configuration errors.

use thiserror::Error;

/// Errors raised while validating run configuration.
///
/// All of these are fatal at startup; no worker is started once one occurs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A numeric option is out of range.
    #[error("Invalid --{name} value: {value}")]
    InvalidBound { name: &'static str, value: String },

    /// Include/exclude filtering removed every operation.
    #[error("No operations selected after include/exclude filtering")]
    EmptyOpSet,

    /// Mode is neither `random` nor `queue`.
    #[error("Unknown --mode: {0}. Use random or queue.")]
    UnknownMode(String),
}

impl ConfigError {
    pub fn invalid(name: &'static str, value: impl ToString) -> Self {
        ConfigError::InvalidBound {
            name,
            value: value.to_string(),
        }
    }
}
