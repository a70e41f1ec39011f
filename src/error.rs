//! Error types surfaced by the parser and the query driver.

use thiserror::Error;

/// A parse failure, positioned at the line/column where it was detected.
///
/// Lines advance on `\n` and on `\r\n`; columns are 1-based Unicode
/// scalar-value offsets within the current line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{line}:{column}: {message}")]
pub struct JsonPathParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl JsonPathParseError {
    pub(crate) fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self { line, column, message: message.into() }
    }
}

/// A runtime invariant violated while applying a parsed query.
///
/// Unlike expression-level type mismatches (which are recovered locally
/// as `null`/falsy), these are fatal for the whole query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonPathError {
    /// Recursive descent walked past the configured `max_depth`.
    #[error("recursive descent exceeded max depth {max_depth}")]
    MaxDepthExceeded { max_depth: usize },

    /// Internal state was corrupted; unreachable under valid inputs.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}
