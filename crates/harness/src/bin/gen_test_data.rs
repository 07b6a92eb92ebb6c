//! Test data generator for the depthwise-convolution testbench
//!
//! Writes input feature maps and convolution weights as hex memory files,
//! plus a simple identity-kernel case for first-light verification.

use qmem_harness::testdata::{
    generate_input, generate_simple_input, generate_simple_weights, generate_weights,
    TestDataConfig,
};
use qmem_memfile::write_hex_values;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = TestDataConfig::default();

    println!("{}", "=".repeat(60));
    println!("Depthwise Convolution Test Data Generator");
    println!("{}", "=".repeat(60));
    println!("Parameters:");
    println!(
        "  Input dimensions: {}x{}x{}",
        config.width, config.height, config.channels
    );
    println!(
        "  Kernel size: {}x{}",
        config.kernel_size, config.kernel_size
    );
    println!("  Data format: {} fixed-point", config.format);
    println!();

    let files = [
        (
            "input_data.mem",
            "Input Feature Map Data",
            generate_input(&config),
        ),
        (
            "weights.mem",
            "Convolution Weights",
            generate_weights(&config),
        ),
        (
            "simple_input.mem",
            "Simple Test Input Data",
            generate_simple_input(&config),
        ),
        (
            "simple_weights.mem",
            "Simple Test Weights",
            generate_simple_weights(&config),
        ),
    ];

    for (path, description, data) in &files {
        println!("Saving {} to {}...", description, path);
        if let Err(e) = write_hex_values(path, data, config.format, description) {
            eprintln!("Error writing {}: {}", path, e);
            std::process::exit(1);
        }
        println!("Saved {} values to {}", data.len(), path);
    }

    println!();
    println!("Test data generation completed!");
    println!("Files generated:");
    for (path, description, _) in &files {
        println!("  - {}: {}", path, description);
    }
}
