//! QMem export driver
//!
//! Loads the classifier parameter file, resolves the configured layers,
//! and writes every memory file the hardware simulation preloads.

use qmem_model::{export_all, ClassifierConfig, ExportConfig, LayerRegistry, SafetensorsLoader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== QMem Memory File Export ===\n");

    let export = ExportConfig::from_env();

    // Classifier description: JSON file when configured, defaults otherwise
    let config = match &export.config_path {
        Some(path) => match ClassifierConfig::from_json_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading classifier config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => ClassifierConfig::default(),
    };
    if let Err(e) = config.validate() {
        eprintln!("Invalid classifier config: {}", e);
        std::process::exit(1);
    }
    println!("Classifier configuration:");
    println!(
        "  Input dimensions: {}x{}x{}",
        config.in_width, config.in_height, config.channels
    );
    println!("  Layers configured: {}", config.layers.len());

    println!("\nLoading parameters from {}...", export.model_path.display());
    let loader = match SafetensorsLoader::from_file(&export.model_path) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error loading parameters: {}", e);
            eprintln!("Set QMEM_MODEL_PATH to the classifier .safetensors file.");
            std::process::exit(1);
        }
    };

    println!("Building layer registry...");
    let registry = match LayerRegistry::from_config(&config, &loader) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error resolving layers: {}", e);
            std::process::exit(1);
        }
    };
    println!("  Resolved {} layers", registry.len());

    println!(
        "\nExporting memory files to {}...",
        export.out_dir.display()
    );
    let manifest = match export_all(&registry, &config, &export.out_dir) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error exporting memory files: {}", e);
            std::process::exit(1);
        }
    };

    println!();
    let mut total_overflows = 0;
    for file in &manifest {
        println!(
            "  {} -> {} ({} lines)",
            file.layer,
            file.path.display(),
            file.lines
        );
        total_overflows += file.overflows;
    }

    println!("\n=== Export Complete ===");
    println!("Files written: {}", manifest.len());
    if total_overflows > 0 {
        println!(
            "\u{26a0} {} values overflowed their Q-format; check the layer widths",
            total_overflows
        );
    } else {
        println!("\u{2713} All values fit their Q-format");
    }
}
