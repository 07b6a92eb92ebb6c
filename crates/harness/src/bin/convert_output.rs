//! Converts a single-line binary memory file to one hex value per line

use qmem_fixed_point::Q8_8;
use qmem_memfile::convert_bit_stream_file;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let input =
        std::env::var("QMEM_INPUT").unwrap_or_else(|_| "memory/hs1_op.mem".to_string());
    let output =
        std::env::var("QMEM_OUTPUT").unwrap_or_else(|_| "memory/hs1_op_fixed.mem".to_string());

    match convert_bit_stream_file(&input, &output, Q8_8) {
        Ok(count) => {
            println!("Done! Converted {} values to {}", count, output);
        }
        Err(e) => {
            eprintln!("Error converting {}: {}", input, e);
            std::process::exit(1);
        }
    }
}
