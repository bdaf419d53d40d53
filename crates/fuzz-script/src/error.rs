//! Error types for literal and script parsing.

use thiserror::Error;

/// A literal could not be decoded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LiteralError {
    #[error("Expected {expected} at offset {offset}")]
    Expected {
        expected: &'static str,
        offset: usize,
    },

    #[error("Unterminated string literal starting at offset {0}")]
    UnterminatedString(usize),

    #[error("Invalid escape sequence at offset {0}")]
    InvalidEscape(usize),

    #[error("Invalid number {text:?} at offset {offset}")]
    InvalidNumber { text: String, offset: usize },

    #[error("Trailing input at offset {0}")]
    Trailing(usize),
}

/// A replay script could not be parsed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    #[error("Line {line}: {source}")]
    Literal {
        line: usize,
        #[source]
        source: LiteralError,
    },

    #[error("Line {line}: unknown table method {method:?}")]
    UnknownMethod { line: usize, method: String },

    #[error("Line {line}: invalid header value for {field}: {value:?}")]
    InvalidHeader {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Script contains no table calls")]
    Empty,
}
