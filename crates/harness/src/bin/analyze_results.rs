//! Accuracy verification results analyzer
//!
//! Reads the accelerator's hex output files and the testbench's analysis
//! summary, computes channel statistics, writes the HTML report, and
//! prints a console summary ending in the overall assessment.

use std::path::PathBuf;

use qmem_harness::{
    channel_distribution, compare_outputs, write_report, AnalysisSummary, Assessment, ReportInputs,
};
use qmem_memfile::read_hex_values;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct AnalyzerConfig {
    actual_path: PathBuf,
    expected_path: PathBuf,
    summary_path: PathBuf,
    report_path: PathBuf,
    plots_dir: PathBuf,
    channel_count: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            actual_path: PathBuf::from("output_results.txt"),
            expected_path: PathBuf::from("memory/hs1_op_fixed.mem"),
            summary_path: PathBuf::from("accuracy_analysis.txt"),
            report_path: PathBuf::from("accuracy_report.html"),
            plots_dir: PathBuf::from("accuracy_plots"),
            channel_count: 16,
        }
    }
}

impl AnalyzerConfig {
    fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("QMEM_ACTUAL") {
            config.actual_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("QMEM_EXPECTED") {
            config.expected_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("QMEM_SUMMARY") {
            config.summary_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("QMEM_REPORT") {
            config.report_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("QMEM_PLOTS_DIR") {
            config.plots_dir = PathBuf::from(path);
        }
        if let Ok(count) = std::env::var("QMEM_CHANNELS") {
            if let Ok(c) = count.parse() {
                config.channel_count = c;
            }
        }

        config
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AnalyzerConfig::from_env();

    println!("Accelerator Accuracy Verification Results Analyzer");
    println!("{}", "=".repeat(60));

    println!("Reading output files...");
    let actual_values = read_hex_values(&config.actual_path);
    let expected_values = read_hex_values(&config.expected_path);
    println!("Actual outputs: {}", actual_values.len());
    println!("Expected outputs: {}", expected_values.len());

    println!("Reading analysis results...");
    let summary = AnalysisSummary::from_file(&config.summary_path);

    println!("Analyzing channel distribution...");
    let channels = channel_distribution(&actual_values, config.channel_count);

    let diff = compare_outputs(&actual_values, &expected_values);
    if diff.compared > 0 {
        println!(
            "Pairwise check over {} values: mean |diff| {:.4} LSB, max |diff| {} LSB",
            diff.compared, diff.mean_abs, diff.max_abs
        );
    }

    println!("Generating comprehensive report...");
    let inputs = ReportInputs {
        summary: &summary,
        channels: &channels,
        plots_dir: &config.plots_dir,
    };
    if let Err(e) = write_report(&config.report_path, &inputs) {
        eprintln!("Error writing report: {}", e);
        std::process::exit(1);
    }

    println!();
    println!("{}", "=".repeat(60));
    println!("ANALYSIS COMPLETED");
    println!("{}", "=".repeat(60));

    let accuracy = summary.exact_match_percent();
    println!("Total outputs processed: {}", summary.total_outputs);
    println!(
        "Exact matches: {} ({:.2}%)",
        summary.exact_matches, accuracy
    );
    println!("Total errors: {}", summary.total_errors);
    println!("Mean absolute error: {:.4} LSB", summary.mean_error);

    match Assessment::classify(accuracy, summary.mean_error) {
        Assessment::Excellent => println!("\u{2713} EXCELLENT: >95% exact matches"),
        Assessment::Good => println!("\u{2713} GOOD: >90% exact matches"),
        Assessment::Acceptable => println!("\u{26a0} ACCEPTABLE: >80% exact matches"),
        Assessment::NeedsImprovement => {
            println!("\u{2717} NEEDS IMPROVEMENT: <80% exact matches")
        }
    }

    println!();
    println!("Generated files:");
    println!(
        "  - {}: Comprehensive HTML report",
        config.report_path.display()
    );
    println!(
        "  - {}: Directory containing visualizations",
        config.plots_dir.display()
    );
}
