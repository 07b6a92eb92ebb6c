//! QMem Model
//!
//! Classifier parameter structures, safetensors ingestion, the explicit
//! layer registry, and the bulk memory-file export dispatcher.

mod config;
mod error;
mod export;
mod loader;
mod registry;
mod tensor;

pub use config::{ClassifierConfig, LayerConfig, QWidths};
pub use error::{ModelError, Result};
pub use export::{export_all, ExportConfig, ExportedFile};
pub use loader::SafetensorsLoader;
pub use registry::{LayerHandle, LayerRegistry};
pub use tensor::{ActivationMap, BatchNormPair, Kernel};
