//! Error types for the gridmul workspace.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by matrix construction, file I/O, configuration, and the
/// worker pool.
#[derive(Debug, Error)]
pub enum GridmulError {
    #[error(
        "dimension mismatch: cannot multiply {left_rows}x{left_cols} by {right_rows}x{right_cols}"
    )]
    DimensionMismatch {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("parse error in {} at line {line}: {reason}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("worker failed: {0}")]
    Worker(String),

    #[error("invalid pool size: {0} (must be at least 1)")]
    InvalidPoolSize(usize),
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, GridmulError>;
