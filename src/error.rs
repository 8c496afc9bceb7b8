use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("attempt to pop from empty set")]
    EmptySet,

    #[error("Got {actual}, expected {expected}")]
    ChecksumMismatch { actual: u64, expected: u64 },

    #[error("Failed to write report: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, BenchError>;
