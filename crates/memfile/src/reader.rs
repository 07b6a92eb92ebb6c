//! Memory-file readers

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;

/// Read one hex value per line, best-effort.
///
/// A missing file degrades to an empty result with a warning; comment
/// lines (`//`), blank lines, and unparsable lines are skipped. These
/// files come from offline simulation runs, so partial data is more
/// useful than an abort.
pub fn read_hex_values<P: AsRef<Path>>(path: P) -> Vec<i64> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(f) => f,
        Err(_) => {
            warn!("file {} not found, treating as empty", path.display());
            return Vec::new();
        }
    };

    let mut values = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        match i64::from_str_radix(line, 16) {
            Ok(v) => values.push(v),
            Err(_) => debug!("skipping unparsable line {:?}", line),
        }
    }
    values
}

/// Read a whole file as one binary bit-stream, stripping all whitespace.
///
/// Unlike the hex readers this fails on a missing file: a bit-stream
/// conversion with no input has nothing meaningful to produce.
pub fn read_bit_stream<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut content = String::new();
    File::open(path)?.read_to_string(&mut content)?;
    Ok(content.split_whitespace().collect())
}
