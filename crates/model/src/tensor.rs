//! Classifier parameter holders
//!
//! Flat storage plus explicit dimensions, shape-checked at construction.

use crate::error::{ModelError, Result};

/// Convolution kernel weights, row-major `[out_channels, height, width]`
#[derive(Debug, Clone)]
pub struct Kernel {
    /// Flat weight values
    pub data: Vec<f32>,
    /// Output channels (one memory-file line each)
    pub out_channels: usize,
    /// Kernel height
    pub height: usize,
    /// Kernel width
    pub width: usize,
}

impl Kernel {
    /// Create from flat f32 values, checking the shape
    pub fn from_f32(data: Vec<f32>, out_channels: usize, height: usize, width: usize) -> Result<Self> {
        let expected = out_channels * height * width;
        if data.len() != expected {
            return Err(ModelError::InvalidShape {
                expected: vec![out_channels, height, width],
                got: vec![data.len()],
            });
        }
        Ok(Self {
            data,
            out_channels,
            height,
            width,
        })
    }

    /// Flattened spatial window size
    pub fn window(&self) -> usize {
        self.height * self.width
    }

    /// The kernel window for one output channel
    pub fn channel_window(&self, out_channel: usize) -> &[f32] {
        let window = self.window();
        &self.data[out_channel * window..(out_channel + 1) * window]
    }

    /// Random kernel for tests
    pub fn random(out_channels: usize, height: usize, width: usize) -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let data = (0..out_channels * height * width)
            .map(|_| rng.gen_range(-1.0..1.0))
            .collect();
        Self {
            data,
            out_channels,
            height,
            width,
        }
    }
}

/// Batch-norm gamma/beta vectors indexed by channel
#[derive(Debug, Clone)]
pub struct BatchNormPair {
    /// Scale per channel
    pub gamma: Vec<f32>,
    /// Shift per channel
    pub beta: Vec<f32>,
    /// Channel count
    pub channels: usize,
}

impl BatchNormPair {
    /// Create from per-channel vectors, checking lengths
    pub fn from_f32(gamma: Vec<f32>, beta: Vec<f32>, channels: usize) -> Result<Self> {
        if gamma.len() != channels || beta.len() != channels {
            return Err(ModelError::InvalidShape {
                expected: vec![channels],
                got: vec![gamma.len(), beta.len()],
            });
        }
        Ok(Self {
            gamma,
            beta,
            channels,
        })
    }
}

/// Activation map, row-major `[channels, height, width]`
#[derive(Debug, Clone)]
pub struct ActivationMap {
    /// Flat activation values
    pub data: Vec<f32>,
    /// Channel count
    pub channels: usize,
    /// Map height
    pub height: usize,
    /// Map width
    pub width: usize,
}

impl ActivationMap {
    /// Create from flat f32 values, checking the shape
    pub fn from_f32(data: Vec<f32>, channels: usize, height: usize, width: usize) -> Result<Self> {
        let expected = channels * height * width;
        if data.len() != expected {
            return Err(ModelError::InvalidShape {
                expected: vec![channels, height, width],
                got: vec![data.len()],
            });
        }
        Ok(Self {
            data,
            channels,
            height,
            width,
        })
    }

    /// One row of one channel
    pub fn row(&self, channel: usize, y: usize) -> &[f32] {
        let start = (channel * self.height + y) * self.width;
        &self.data[start..start + self.width]
    }
}
