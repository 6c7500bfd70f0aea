//! Error types for notebook operations.

use thiserror::Error;

/// Errors raised before a subprocess outcome exists.
///
/// Failures *of* a notebook (non-zero exit, timeout) are not errors; they are
/// reported through [`crate::result::OpOutcome`]. `ToolError` covers the
/// infrastructure around an operation: bad patterns, spawn failures, io.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Invalid glob pattern syntax.
    #[error("invalid pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },

    /// Failure spawning or supervising a subprocess.
    #[error("process error: {0}")]
    Process(String),

    /// Filesystem error while preparing an operation.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
