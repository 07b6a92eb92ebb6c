//! Classifier description

use std::collections::HashSet;
use std::path::Path;

use qmem_fixed_point::QFormat;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Serializable Q-format widths
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct QWidths {
    /// Integer bits, sign included
    pub int_bits: u32,
    /// Fractional bits
    pub frac_bits: u32,
}

impl QWidths {
    /// Resolve into a validated codec format
    pub fn to_format(self) -> Result<QFormat> {
        Ok(QFormat::new(self.int_bits, self.frac_bits)?)
    }
}

/// One exportable component of the classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayerConfig {
    /// Convolution kernel weights, one memory-file line per output channel
    Conv {
        name: String,
        tensor: String,
        out_channels: usize,
        kernel_height: usize,
        kernel_width: usize,
    },
    /// Batch-norm gamma/beta pair, two memory-file lines
    BatchNorm {
        name: String,
        gamma_tensor: String,
        beta_tensor: String,
        channels: usize,
    },
    /// Activation map, one memory-file line per channel row
    Activation {
        name: String,
        tensor: String,
        channels: usize,
        height: usize,
        width: usize,
    },
}

impl LayerConfig {
    /// The registry key for this layer
    pub fn name(&self) -> &str {
        match self {
            LayerConfig::Conv { name, .. } => name,
            LayerConfig::BatchNorm { name, .. } => name,
            LayerConfig::Activation { name, .. } => name,
        }
    }
}

/// Classifier configuration: input geometry, per-component Q-formats, and
/// the list of layers to export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Input feature-map width
    #[serde(default = "default_in_width")]
    pub in_width: usize,

    /// Input feature-map height
    #[serde(default = "default_in_height")]
    pub in_height: usize,

    /// Number of channels processed per layer
    #[serde(default = "default_channels")]
    pub channels: usize,

    /// Convolution kernel size (square)
    #[serde(default = "default_kernel_size")]
    pub kernel_size: usize,

    /// Q-format for convolution weights
    #[serde(default = "default_weight_widths")]
    pub weight_widths: QWidths,

    /// Q-format for batch-norm parameters
    #[serde(default = "default_batchnorm_widths")]
    pub batchnorm_widths: QWidths,

    /// Q-format for activations and testbench data
    #[serde(default = "default_activation_widths")]
    pub activation_widths: QWidths,

    /// Layers to export, in file-generation order
    #[serde(default = "default_layers")]
    pub layers: Vec<LayerConfig>,
}

fn default_in_width() -> usize {
    112
}
fn default_in_height() -> usize {
    112
}
fn default_channels() -> usize {
    16
}
fn default_kernel_size() -> usize {
    3
}
fn default_weight_widths() -> QWidths {
    QWidths {
        int_bits: 4,
        frac_bits: 4,
    }
}
fn default_batchnorm_widths() -> QWidths {
    QWidths {
        int_bits: 4,
        frac_bits: 4,
    }
}
fn default_activation_widths() -> QWidths {
    QWidths {
        int_bits: 8,
        frac_bits: 8,
    }
}

fn default_layers() -> Vec<LayerConfig> {
    vec![
        LayerConfig::Conv {
            name: "first_layer.conv".to_string(),
            tensor: "features.0.conv.weight".to_string(),
            out_channels: default_channels(),
            kernel_height: default_kernel_size(),
            kernel_width: default_kernel_size(),
        },
        LayerConfig::BatchNorm {
            name: "first_layer.bn".to_string(),
            gamma_tensor: "features.0.bn.weight".to_string(),
            beta_tensor: "features.0.bn.bias".to_string(),
            channels: default_channels(),
        },
    ]
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            in_width: default_in_width(),
            in_height: default_in_height(),
            channels: default_channels(),
            kernel_size: default_kernel_size(),
            weight_widths: default_weight_widths(),
            batchnorm_widths: default_batchnorm_widths(),
            activation_widths: default_activation_widths(),
            layers: default_layers(),
        }
    }
}

impl ClassifierConfig {
    /// Load from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Validate geometry, formats, and layer-name uniqueness
    pub fn validate(&self) -> Result<()> {
        if self.channels == 0 || self.in_width == 0 || self.in_height == 0 {
            return Err(ModelError::Config(
                "input geometry must be non-zero".to_string(),
            ));
        }
        if self.kernel_size == 0 {
            return Err(ModelError::Config("kernel_size must be non-zero".to_string()));
        }
        if self.layers.is_empty() {
            return Err(ModelError::Config("no layers configured".to_string()));
        }

        self.weight_widths.to_format()?;
        self.batchnorm_widths.to_format()?;
        self.activation_widths.to_format()?;

        let mut seen = HashSet::new();
        for layer in &self.layers {
            if !seen.insert(layer.name()) {
                return Err(ModelError::Config(format!(
                    "duplicate layer name: {}",
                    layer.name()
                )));
            }
        }
        Ok(())
    }
}
