//! Bulk memory-file export

use std::path::{Path, PathBuf};

use qmem_memfile::{activation_lines, batchnorm_lines, kernel_lines, write_packed_lines};
use tracing::{debug, info, warn};

use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::registry::{LayerHandle, LayerRegistry};

/// Paths and inputs for an export run
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Path to the classifier `.safetensors` parameter file
    pub model_path: PathBuf,

    /// Optional JSON classifier description; defaults apply when absent
    pub config_path: Option<PathBuf>,

    /// Directory receiving the generated `.mem` files
    pub out_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("classifier.safetensors"),
            config_path: None,
            out_dir: PathBuf::from("memory"),
        }
    }
}

impl ExportConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("QMEM_MODEL_PATH") {
            config.model_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("QMEM_CONFIG_PATH") {
            config.config_path = Some(PathBuf::from(path));
        }
        if let Ok(dir) = std::env::var("QMEM_OUT_DIR") {
            config.out_dir = PathBuf::from(dir);
        }

        config
    }
}

/// Record of one written memory file
#[derive(Debug, Clone)]
pub struct ExportedFile {
    /// Layer name from the registry
    pub layer: String,
    /// Written file path
    pub path: PathBuf,
    /// Lines in the file
    pub lines: usize,
    /// Values that overflowed their Q-format
    pub overflows: usize,
}

/// Walk the registry and write one memory file per layer.
///
/// File names derive from layer names with dots replaced, e.g.
/// `first_layer.conv` becomes `first_layer_conv.mem`. Returns the manifest
/// of written files in registry order.
pub fn export_all(
    registry: &LayerRegistry,
    config: &ClassifierConfig,
    out_dir: &Path,
) -> Result<Vec<ExportedFile>> {
    std::fs::create_dir_all(out_dir)?;

    let weight_format = config.weight_widths.to_format()?;
    let batchnorm_format = config.batchnorm_widths.to_format()?;
    let activation_format = config.activation_widths.to_format()?;

    let mut manifest = Vec::with_capacity(registry.len());
    for (name, handle) in registry.iter() {
        let packed = match handle {
            LayerHandle::Conv(kernel) => {
                let values: Vec<f64> = kernel.data.iter().map(|&v| v as f64).collect();
                kernel_lines(&values, kernel.out_channels, kernel.window(), weight_format)?
            }
            LayerHandle::BatchNorm(pair) => {
                let gamma: Vec<f64> = pair.gamma.iter().map(|&v| v as f64).collect();
                let beta: Vec<f64> = pair.beta.iter().map(|&v| v as f64).collect();
                batchnorm_lines(&gamma, &beta, batchnorm_format)?
            }
            LayerHandle::Activation(map) => {
                let values: Vec<f64> = map.data.iter().map(|&v| v as f64).collect();
                activation_lines(
                    &values,
                    map.channels,
                    map.height,
                    map.width,
                    activation_format,
                )?
            }
        };

        let file_name = format!("{}.mem", name.replace('.', "_"));
        let path = out_dir.join(file_name);
        write_packed_lines(&path, &packed)?;

        if packed.overflows > 0 {
            warn!(
                "layer {}: {} values overflowed their format",
                name, packed.overflows
            );
        }
        info!("wrote {} ({} lines)", path.display(), packed.len());
        debug!("layer {} overflows: {}", name, packed.overflows);

        manifest.push(ExportedFile {
            layer: name.to_string(),
            path,
            lines: packed.len(),
            overflows: packed.overflows,
        });
    }

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayerConfig, QWidths};
    use crate::loader::SafetensorsLoader;
    use safetensors::tensor::TensorView;
    use safetensors::Dtype;
    use std::collections::HashMap;

    fn fixture() -> (ClassifierConfig, SafetensorsLoader) {
        let kernel: Vec<f32> = (1..=9).map(|v| v as f32 * 0.25).collect();
        let kernel_bytes: Vec<u8> = kernel.iter().flat_map(|v| v.to_le_bytes()).collect();

        let mut tensors = HashMap::new();
        tensors.insert(
            "conv.weight".to_string(),
            TensorView::new(Dtype::F32, vec![1, 3, 3], &kernel_bytes).unwrap(),
        );
        let bytes = safetensors::serialize(&tensors, &None).unwrap();

        let config = ClassifierConfig {
            weight_widths: QWidths {
                int_bits: 4,
                frac_bits: 4,
            },
            layers: vec![LayerConfig::Conv {
                name: "l1.conv".to_string(),
                tensor: "conv.weight".to_string(),
                out_channels: 1,
                kernel_height: 3,
                kernel_width: 3,
            }],
            ..ClassifierConfig::default()
        };

        (config, SafetensorsLoader::from_bytes(bytes).unwrap())
    }

    #[test]
    fn test_export_writes_manifest() {
        let (config, loader) = fixture();
        let registry = LayerRegistry::from_config(&config, &loader).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let manifest = export_all(&registry, &config, dir.path()).unwrap();

        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest[0].layer, "l1.conv");
        assert_eq!(manifest[0].lines, 1);
        assert_eq!(manifest[0].overflows, 0);
        assert!(manifest[0].path.ends_with("l1_conv.mem"));

        let written = std::fs::read_to_string(&manifest[0].path).unwrap();
        // One output channel: a single line, reverse raster, 9 values x 8 bits
        assert_eq!(written.lines().count(), 1);
        assert_eq!(written.len(), 72);
    }

    #[test]
    fn test_export_config_defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.out_dir, PathBuf::from("memory"));
        assert!(config.config_path.is_none());
    }
}
