//! Bit-stream to hex re-basing
//!
//! Converts a single-line binary memory file into one uppercase hex value
//! per line. This is a straight change of base over an existing
//! bit-stream, not a new quantization.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use qmem_fixed_point::QFormat;
use tracing::warn;

use crate::error::{MemFileError, Result};
use crate::reader::read_bit_stream;

/// Slice a bit-stream into `total_bits`-wide chunks and render each as
/// zero-padded uppercase hex. A trailing partial chunk is dropped, as the
/// original conversion flow did.
pub fn rebase_bits_to_hex(bits: &str, format: QFormat) -> Result<Vec<String>> {
    let width = format.total_bits() as usize;
    let complete = bits.len() / width;
    let remainder = bits.len() % width;
    if remainder != 0 {
        warn!(
            "dropping trailing partial chunk of {} bits (expected multiples of {})",
            remainder, width
        );
    }

    let mut values = Vec::with_capacity(complete);
    for index in 0..complete {
        let chunk = bits
            .get(index * width..(index + 1) * width)
            .ok_or(MemFileError::BadChunk { index })?;
        let raw = u32::from_str_radix(chunk, 2)
            .map_err(|_| MemFileError::BadChunk { index })?;
        values.push(format.raw_to_hex(raw));
    }
    Ok(values)
}

/// Re-base an on-disk bit-stream file into a hex-per-line memory file,
/// every line newline-terminated. Returns the number of values written.
pub fn convert_bit_stream_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    format: QFormat,
) -> Result<usize> {
    let bits = read_bit_stream(input)?;
    let lines = rebase_bits_to_hex(&bits, format)?;

    let mut out = BufWriter::new(File::create(output)?);
    for line in &lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;
    Ok(lines.len())
}
