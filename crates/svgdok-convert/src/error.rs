//! Error types for external converter invocation

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting a vector image
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The converter binary is not installed or not on PATH
    #[error("Converter not available: {tool}")]
    Unavailable {
        /// Name of the missing binary
        tool: String,
    },

    /// The converter exited with a failure status
    #[error("Converter {tool} failed: {status}")]
    Failed {
        /// Name of the binary that failed
        tool: String,
        /// Exit status description (code or signal)
        status: String,
    },

    /// The converter exited successfully but wrote no output file
    #[error("Converter produced no output at {path}")]
    MissingOutput {
        /// Expected destination path
        path: PathBuf,
    },

    /// The converter did not finish within the allowed time
    #[error("Converter {tool} timed out after {secs}s")]
    TimedOut {
        /// Name of the binary that hung
        tool: String,
        /// Timeout that was enforced, in seconds
        secs: u64,
    },

    /// Error spawning or waiting on the converter process
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for converter operations
pub type Result<T> = std::result::Result<T, ConvertError>;
