//! Memory-file error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fixed-point error: {0}")]
    FixedPoint(#[from] qmem_fixed_point::FixedPointError),

    #[error("Shape mismatch: expected {expected} values, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("Channel length mismatch: gamma has {gamma} values, beta has {beta}")]
    ChannelMismatch { gamma: usize, beta: usize },

    #[error("Invalid binary chunk at value {index}")]
    BadChunk { index: usize },
}

pub type Result<T> = std::result::Result<T, MemFileError>;
