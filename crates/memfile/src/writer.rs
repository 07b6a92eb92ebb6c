//! Memory-file writers

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use qmem_fixed_point::QFormat;

use crate::error::Result;
use crate::layout::PackedLines;

/// Write packed bit-string lines as a headerless memory file.
///
/// Lines are separated by `\n` with no trailing newline after the last
/// line; the testbench readers expect exactly this shape.
pub fn write_packed_lines<P: AsRef<Path>>(path: P, packed: &PackedLines) -> Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    for (i, line) in packed.lines.iter().enumerate() {
        if i > 0 {
            out.write_all(b"\n")?;
        }
        out.write_all(line.as_bytes())?;
    }

    out.flush()?;
    Ok(())
}

/// Write raw fixed-point values as a generator-style memory file: a `//`
/// comment header (description, format, entry count) followed by one
/// lowercase hex value per line.
pub fn write_hex_values<P: AsRef<Path>>(
    path: P,
    values: &[u32],
    format: QFormat,
    description: &str,
) -> Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "// {}", description)?;
    writeln!(
        out,
        "// Format: {}-bit signed fixed-point ({})",
        format.total_bits(),
        format
    )?;
    writeln!(out, "// Total entries: {}", values.len())?;
    writeln!(out, "//")?;

    let digits = ((format.total_bits() + 3) / 4) as usize;
    for &value in values {
        writeln!(out, "{:0digits$x}", value, digits = digits)?;
    }

    out.flush()?;
    Ok(())
}
