//! Component-specific line packing

use qmem_fixed_point::QFormat;

use crate::error::{MemFileError, Result};

/// Lines ready to be written as one memory file, with a count of values
/// that overflowed their Q-format during encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedLines {
    /// One entry per output line, in file order
    pub lines: Vec<String>,
    /// Number of encoded values whose magnitude did not fit the format
    pub overflows: usize,
}

impl PackedLines {
    /// Total number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether there are no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Encode a slice in reverse order into one concatenated line, counting
/// overflows into `overflows`
fn pack_reversed(values: &[f64], format: QFormat, overflows: &mut usize) -> String {
    let mut line = String::with_capacity(values.len() * format.total_bits() as usize);
    for &value in values.iter().rev() {
        let encoded = format.encode(value);
        if encoded.overflow {
            *overflows += 1;
        }
        line.push_str(&encoded.bits);
    }
    line
}

/// Build kernel-weight lines: one line per output channel, the channel's
/// kernel window concatenated in reverse raster order (last spatial
/// position first).
///
/// `weights` is row-major `[out_channels, window]` where `window` is the
/// flattened kernel height x width.
pub fn kernel_lines(
    weights: &[f64],
    out_channels: usize,
    window: usize,
    format: QFormat,
) -> Result<PackedLines> {
    let expected = out_channels * window;
    if window == 0 || weights.len() != expected {
        return Err(MemFileError::ShapeMismatch {
            expected,
            got: weights.len(),
        });
    }

    let mut overflows = 0;
    let lines = weights
        .chunks_exact(window)
        .map(|channel| pack_reversed(channel, format, &mut overflows))
        .collect();

    Ok(PackedLines { lines, overflows })
}

/// Build batch-norm parameter lines: gamma then beta, each as one line of
/// all channel values in reverse channel order.
pub fn batchnorm_lines(gamma: &[f64], beta: &[f64], format: QFormat) -> Result<PackedLines> {
    if gamma.len() != beta.len() {
        return Err(MemFileError::ChannelMismatch {
            gamma: gamma.len(),
            beta: beta.len(),
        });
    }

    let mut overflows = 0;
    let lines = vec![
        pack_reversed(gamma, format, &mut overflows),
        pack_reversed(beta, format, &mut overflows),
    ];

    Ok(PackedLines { lines, overflows })
}

/// Build activation-map lines for a `[channels, height, width]` tensor:
/// one line per (channel, row) pair in channel-major order, the row's
/// values concatenated in reverse column order.
pub fn activation_lines(
    values: &[f64],
    channels: usize,
    height: usize,
    width: usize,
    format: QFormat,
) -> Result<PackedLines> {
    let expected = channels * height * width;
    if width == 0 || values.len() != expected {
        return Err(MemFileError::ShapeMismatch {
            expected,
            got: values.len(),
        });
    }

    let mut overflows = 0;
    let lines = values
        .chunks_exact(width)
        .map(|row| pack_reversed(row, format, &mut overflows))
        .collect();

    Ok(PackedLines { lines, overflows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use qmem_fixed_point::Q4_4;

    #[test]
    fn test_kernel_line_reverse_raster() {
        // 3x3 kernel 1..9 must emit 9,8,7,6,5,4,3,2,1
        let weights: Vec<f64> = (1..=9).map(f64::from).collect();
        let packed = kernel_lines(&weights, 1, 9, Q4_4).unwrap();

        assert_eq!(packed.len(), 1);
        let expected: String = (1..=9)
            .rev()
            .map(|v| Q4_4.encode(f64::from(v)).bits)
            .collect();
        assert_eq!(packed.lines[0], expected);
        assert_eq!(packed.overflows, 2); // 8 and 9 exceed Q4.4
    }

    #[test]
    fn test_kernel_one_line_per_channel() {
        let weights = vec![0.5; 4 * 9];
        let packed = kernel_lines(&weights, 4, 9, Q4_4).unwrap();
        assert_eq!(packed.len(), 4);
        assert_eq!(packed.lines[0].len(), 9 * 8);
        assert_eq!(packed.overflows, 0);
    }

    #[test]
    fn test_kernel_shape_checked() {
        let weights = vec![0.0; 10];
        assert!(matches!(
            kernel_lines(&weights, 2, 9, Q4_4),
            Err(MemFileError::ShapeMismatch { expected: 18, got: 10 })
        ));
    }

    #[test]
    fn test_batchnorm_two_lines_reverse_channel() {
        let gamma = [1.0, 2.0, 3.0];
        let beta = [-1.0, -2.0, -3.0];
        let packed = batchnorm_lines(&gamma, &beta, Q4_4).unwrap();

        assert_eq!(packed.len(), 2);
        let expected_gamma: String = [3.0, 2.0, 1.0]
            .iter()
            .map(|&v| Q4_4.encode(v).bits)
            .collect();
        assert_eq!(packed.lines[0], expected_gamma);
        let expected_beta: String = [-3.0, -2.0, -1.0]
            .iter()
            .map(|&v| Q4_4.encode(v).bits)
            .collect();
        assert_eq!(packed.lines[1], expected_beta);
    }

    #[test]
    fn test_batchnorm_length_mismatch() {
        assert!(matches!(
            batchnorm_lines(&[1.0, 2.0], &[1.0], Q4_4),
            Err(MemFileError::ChannelMismatch { gamma: 2, beta: 1 })
        ));
    }

    #[test]
    fn test_activation_line_per_channel_row() {
        // 2 channels x 2 rows x 3 columns
        let values: Vec<f64> = (0..12).map(f64::from).collect();
        let packed = activation_lines(&values, 2, 2, 3, Q4_4).unwrap();

        assert_eq!(packed.len(), 4);
        // First line is channel 0, row 0 = [0, 1, 2] reversed
        let expected: String = [2.0, 1.0, 0.0]
            .iter()
            .map(|&v| Q4_4.encode(v).bits)
            .collect();
        assert_eq!(packed.lines[0], expected);
        // Last line is channel 1, row 1 = [9, 10, 11] reversed
        let expected: String = [11.0, 10.0, 9.0]
            .iter()
            .map(|&v| Q4_4.encode(v).bits)
            .collect();
        assert_eq!(packed.lines[3], expected);
    }
}
