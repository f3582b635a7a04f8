//! Data loading error types.

use crate::domain::{DomainError, TimeError};

/// Errors that can occur while reading the data directory.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A file could not be opened or parsed as CSV
    #[error("{file}: {source}")]
    Csv {
        file: &'static str,
        source: csv::Error,
    },

    /// A time field could not be parsed
    #[error("{file} line {line}: {source}")]
    Time {
        file: &'static str,
        line: u64,
        source: TimeError,
    },

    /// A record does not fit the data loaded so far
    #[error("{file} line {line}: {source}")]
    Domain {
        file: &'static str,
        line: u64,
        source: DomainError,
    },

    /// A field holds a value out of range
    #[error("{file} line {line}: {message}")]
    Invalid {
        file: &'static str,
        line: u64,
        message: String,
    },
}
