//! Explicit layer registry
//!
//! Every configured layer name is resolved against the loaded tensors
//! once, when the parameter set is loaded. Lookups after that are plain
//! map reads; there is no runtime reflection.

use crate::config::{ClassifierConfig, LayerConfig};
use crate::error::Result;
use crate::loader::SafetensorsLoader;
use crate::tensor::{ActivationMap, BatchNormPair, Kernel};

/// A typed handle to one exportable layer
#[derive(Debug, Clone)]
pub enum LayerHandle {
    /// Convolution kernel weights
    Conv(Kernel),
    /// Batch-norm parameter pair
    BatchNorm(BatchNormPair),
    /// Activation map
    Activation(ActivationMap),
}

/// Ordered name-to-handle mapping for all configured layers
#[derive(Debug)]
pub struct LayerRegistry {
    entries: Vec<(String, LayerHandle)>,
}

impl LayerRegistry {
    /// Resolve every configured layer against the loaded tensors.
    ///
    /// Fails fast on the first unknown tensor name or shape mismatch so a
    /// bad configuration never produces a partial export.
    pub fn from_config(config: &ClassifierConfig, loader: &SafetensorsLoader) -> Result<Self> {
        let mut entries = Vec::with_capacity(config.layers.len());

        for layer in &config.layers {
            let handle = match layer {
                LayerConfig::Conv {
                    tensor,
                    out_channels,
                    kernel_height,
                    kernel_width,
                    ..
                } => {
                    let data = loader.tensor_f32(tensor)?;
                    LayerHandle::Conv(Kernel::from_f32(
                        data,
                        *out_channels,
                        *kernel_height,
                        *kernel_width,
                    )?)
                }
                LayerConfig::BatchNorm {
                    gamma_tensor,
                    beta_tensor,
                    channels,
                    ..
                } => {
                    let gamma = loader.tensor_f32(gamma_tensor)?;
                    let beta = loader.tensor_f32(beta_tensor)?;
                    LayerHandle::BatchNorm(BatchNormPair::from_f32(gamma, beta, *channels)?)
                }
                LayerConfig::Activation {
                    tensor,
                    channels,
                    height,
                    width,
                    ..
                } => {
                    let data = loader.tensor_f32(tensor)?;
                    LayerHandle::Activation(ActivationMap::from_f32(
                        data, *channels, *height, *width,
                    )?)
                }
            };
            entries.push((layer.name().to_string(), handle));
        }

        Ok(Self { entries })
    }

    /// Look up a layer by name
    pub fn get(&self, name: &str) -> Option<&LayerHandle> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, handle)| handle)
    }

    /// Iterate layers in configuration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LayerHandle)> {
        self.entries
            .iter()
            .map(|(name, handle)| (name.as_str(), handle))
    }

    /// Number of registered layers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
