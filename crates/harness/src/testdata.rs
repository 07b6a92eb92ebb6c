//! Synthetic testbench data
//!
//! Feature maps and kernels for the depthwise-convolution testbench, in
//! the generator's hex memory-file format. Patterns rotate per channel so
//! one run exercises smooth, periodic, and noisy inputs at once.

use qmem_fixed_point::QFormat;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generation parameters
#[derive(Debug, Clone)]
pub struct TestDataConfig {
    /// Input feature-map width
    pub width: usize,
    /// Input feature-map height
    pub height: usize,
    /// Channel count
    pub channels: usize,
    /// Kernel size (square)
    pub kernel_size: usize,
    /// Fixed-point format for all emitted values
    pub format: QFormat,
    /// Seed for the noise channels, so runs are reproducible
    pub seed: u64,
}

impl Default for TestDataConfig {
    fn default() -> Self {
        Self {
            width: 112,
            height: 112,
            channels: 16,
            kernel_size: 3,
            format: qmem_fixed_point::Q8_8,
            seed: 0x51_F0ED,
        }
    }
}

const IDENTITY: [[f64; 3]; 3] = [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]];
const BLUR: [[f64; 3]; 3] = [[1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 1.0]];
const EDGE: [[f64; 3]; 3] = [[-1.0, -1.0, -1.0], [-1.0, 8.0, -1.0], [-1.0, -1.0, -1.0]];
const SOBEL_X: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];

/// Generate input feature maps: checkerboard, gradient, sinusoid, and
/// noise channels in rotation, each with a channel-proportional offset.
pub fn generate_input(config: &TestDataConfig) -> Vec<u32> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut data = Vec::with_capacity(config.channels * config.height * config.width);

    for ch in 0..config.channels {
        for y in 0..config.height {
            for x in 0..config.width {
                let mut value = match ch % 4 {
                    0 => {
                        if (x + y) % 2 == 0 {
                            0.5
                        } else {
                            -0.5
                        }
                    }
                    1 => (x + y) as f64 / (config.width + config.height) as f64 - 0.5,
                    2 => {
                        0.5 * (2.0 * std::f64::consts::PI * x as f64 / 32.0).sin()
                            * (2.0 * std::f64::consts::PI * y as f64 / 32.0).cos()
                    }
                    _ => rng.gen_range(-0.3..0.3),
                };
                value += 0.1 * ch as f64 / config.channels as f64;
                data.push(config.format.to_raw(value));
            }
        }
    }

    data
}

/// Generate convolution weights: identity, blur, edge-detect, and Sobel-X
/// kernels in rotation, normalized per kernel type.
pub fn generate_weights(config: &TestDataConfig) -> Vec<u32> {
    let mut data = Vec::with_capacity(config.channels * config.kernel_size * config.kernel_size);

    for ch in 0..config.channels {
        let (kernel, scale) = match ch % 4 {
            0 => (&IDENTITY, 1.0),
            1 => (&BLUR, 1.0 / 9.0),
            2 => (&EDGE, 1.0 / 9.0),
            _ => (&SOBEL_X, 1.0 / 8.0),
        };

        for ky in 0..config.kernel_size {
            for kx in 0..config.kernel_size {
                let weight = kernel[ky % 3][kx % 3] * scale;
                data.push(config.format.to_raw(weight));
            }
        }
    }

    data
}

/// Simple verification input: a small known pattern in the top-left
/// corner of every channel, zero elsewhere.
pub fn generate_simple_input(config: &TestDataConfig) -> Vec<u32> {
    let mut data = Vec::with_capacity(config.channels * config.height * config.width);

    for _ch in 0..config.channels {
        for y in 0..config.height {
            for x in 0..config.width {
                let value = if x < 3 && y < 3 {
                    (x + y + 1) as f64 * 0.1
                } else {
                    0.0
                };
                data.push(config.format.to_raw(value));
            }
        }
    }

    data
}

/// Simple verification weights: identity kernels (center tap only), so
/// the expected output equals the input.
pub fn generate_simple_weights(config: &TestDataConfig) -> Vec<u32> {
    let center = config.kernel_size / 2;
    let mut data = Vec::with_capacity(config.channels * config.kernel_size * config.kernel_size);

    for _ch in 0..config.channels {
        for ky in 0..config.kernel_size {
            for kx in 0..config.kernel_size {
                let value = if ky == center && kx == center { 1.0 } else { 0.0 };
                data.push(config.format.to_raw(value));
            }
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> TestDataConfig {
        TestDataConfig {
            width: 8,
            height: 8,
            channels: 4,
            ..TestDataConfig::default()
        }
    }

    #[test]
    fn test_input_size_and_determinism() {
        let config = small_config();
        let a = generate_input(&config);
        let b = generate_input(&config);
        assert_eq!(a.len(), 4 * 8 * 8);
        assert_eq!(a, b);
    }

    #[test]
    fn test_checkerboard_channel() {
        let config = small_config();
        let data = generate_input(&config);
        // Channel 0 has no offset and alternates +-0.5 in Q8.8
        assert_eq!(data[0], 0x0080);
        assert_eq!(data[1], 0xFF80);
    }

    #[test]
    fn test_weights_identity_channel() {
        let config = small_config();
        let data = generate_weights(&config);
        // Channel 0 is the identity kernel: center tap 1.0, rest zero
        let one = config.format.to_raw(1.0);
        assert_eq!(data[4], one);
        assert_eq!(data.iter().take(9).filter(|&&v| v != 0).count(), 1);
    }

    #[test]
    fn test_simple_case_shapes() {
        let config = small_config();
        let input = generate_simple_input(&config);
        let weights = generate_simple_weights(&config);
        assert_eq!(input.len(), 4 * 8 * 8);
        assert_eq!(weights.len(), 4 * 3 * 3);
        // Corner pattern: (0,0) is 0.1, (2,2) is 0.5
        assert_eq!(input[0], config.format.to_raw(0.1));
        assert_eq!(input[2 * 8 + 2], config.format.to_raw(0.5));
        assert_eq!(input[5 * 8 + 5], 0);
    }
}
