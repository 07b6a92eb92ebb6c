//! Harness error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Memory-file error: {0}")]
    MemFile(#[from] qmem_memfile::MemFileError),

    #[error("Model error: {0}")]
    Model(#[from] qmem_model::ModelError),

    #[error("Fixed-point error: {0}")]
    FixedPoint(#[from] qmem_fixed_point::FixedPointError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
