//! QMem Memory Files
//!
//! Builders, readers, and writers for the plain-text memory files the
//! hardware simulation preloads. Packing order within a line is
//! load-bearing: the testbench reads these files assuming one specific
//! ordering per component, and a reordered file corrupts the simulated
//! computation without any error being raised.

mod error;
mod layout;
mod reader;
mod rebase;
mod writer;

pub use error::{MemFileError, Result};
pub use layout::{activation_lines, batchnorm_lines, kernel_lines, PackedLines};
pub use reader::{read_bit_stream, read_hex_values};
pub use rebase::{convert_bit_stream_file, rebase_bits_to_hex};
pub use writer::{write_hex_values, write_packed_lines};
