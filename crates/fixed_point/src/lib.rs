//! QMem Fixed-Point Codec
//!
//! Bit-exact conversion between real values and fixed-width two's-complement
//! representations, matching the formats consumed by the accelerator's
//! memory files.

mod error;
mod format;

pub use error::{FixedPointError, Result};
pub use format::{EncodedBits, QFormat, Q4_4, Q8_8};
