//! Error types for the benchmark run.
//!
//! Every failure here is fatal for the run: nothing is retried, and a
//! results row that has been appended is never rolled back.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing the results log or the state record failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state record exists but is not valid JSON
    #[error("corrupt run state in {}: {source}", path.display())]
    CorruptState {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The state record parsed but holds an impossible position
    #[error("invalid run state in {}: {message}", path.display())]
    InvalidState { path: PathBuf, message: String },

    /// Results log encoding or decoding failed
    #[error("results log error: {0}")]
    Csv(#[from] csv::Error),

    /// Process parameters are out of range
    #[error("configuration error: {message}")]
    Config { message: String },

    /// The nonce search was stopped through its cancellation token
    #[error("mining cancelled")]
    Cancelled,

    /// Every nonce from the start position up to `u64::MAX` was tried
    #[error("nonce space exhausted without satisfying difficulty {difficulty}")]
    NonceSpaceExhausted { difficulty: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
