//! Fixed-point error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixedPointError {
    #[error("Invalid Q-format: {int_bits} integer + {frac_bits} fractional bits (need at least 1 integer bit, at most 32 total)")]
    InvalidWidths { int_bits: u32, frac_bits: u32 },

    #[error("Bit-string width mismatch: expected {expected} bits, got {got}")]
    WidthMismatch { expected: usize, got: usize },

    #[error("Invalid bit character {found:?} at position {position}")]
    InvalidBit { position: usize, found: char },

    #[error("Packed string too short: need {needed} bits, got {got}")]
    PackedTooShort { needed: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, FixedPointError>;
