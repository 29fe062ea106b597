use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for fallible engine operations.
pub type Result<T> = std::result::Result<T, AutomatonError>;

/// Errors surfaced by the rule source and configuration layers.
///
/// None of these leave partial state behind: a failed edit or load keeps the
/// previous rule table.
#[derive(Debug, Error)]
pub enum AutomatonError {
    /// Out-of-range rule index, non-boolean state or unknown edit target.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Persisted rule record with a missing or miscoded field.
    #[error("malformed rule record: {0}")]
    MalformedRecord(String),
    /// A rule or config file could not be read or written.
    #[error("i/o failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Indicates an invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

impl AutomatonError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
