//! HTML report generation
//!
//! Produces a single self-contained report file: inline CSS only, with
//! the plot images referenced by path from the plots directory.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::assessment::Assessment;
use crate::channels::ChannelStats;
use crate::error::Result;
use crate::summary::AnalysisSummary;

/// Everything the report renders
#[derive(Debug)]
pub struct ReportInputs<'a> {
    /// Parsed summary metrics
    pub summary: &'a AnalysisSummary,
    /// Per-channel statistics
    pub channels: &'a [ChannelStats],
    /// Directory scanned for `.png` plots to embed
    pub plots_dir: &'a Path,
}

const STYLE: &str = "\
            body { font-family: Arial, sans-serif; margin: 40px; }
            .header { background-color: #f0f0f0; padding: 20px; border-radius: 5px; }
            .section { margin: 20px 0; padding: 15px; border: 1px solid #ddd; border-radius: 5px; }
            .metric { display: inline-block; margin: 10px; padding: 10px; background-color: #e8f4f8; border-radius: 3px; }
            .good { background-color: #d4edda; }
            .warning { background-color: #fff3cd; }
            .error { background-color: #f8d7da; }
            table { border-collapse: collapse; width: 100%; }
            th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
            th { background-color: #f2f2f2; }
            .plot { text-align: center; margin: 20px 0; }";

/// Build the report HTML
pub fn build_report(inputs: &ReportInputs<'_>) -> String {
    let mut html = String::new();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n\
         <title>Accelerator Accuracy Verification Report</title>\n\
         <style>\n{}\n</style>\n</head>\n<body>\n\
         <div class=\"header\">\n\
         <h1>Accelerator Accuracy Verification Report</h1>\n\
         <p>Comprehensive analysis of the accelerator's performance against expected outputs</p>\n\
         </div>\n",
        STYLE
    );

    push_summary_section(&mut html, inputs.summary);
    push_channel_section(&mut html, inputs.channels);
    push_plots_section(&mut html, inputs.plots_dir);
    push_assessment_section(&mut html, inputs.summary);

    html.push_str("</body>\n</html>\n");
    html
}

/// Build the report and write it to `path`
pub fn write_report<P: AsRef<Path>>(path: P, inputs: &ReportInputs<'_>) -> Result<()> {
    std::fs::write(path, build_report(inputs))?;
    Ok(())
}

fn push_summary_section(html: &mut String, summary: &AnalysisSummary) {
    let accuracy = summary.exact_match_percent();
    let error_rate = summary.error_percent();

    let accuracy_class = if accuracy > 95.0 {
        "good"
    } else if accuracy > 80.0 {
        "warning"
    } else {
        "error"
    };
    let error_class = if error_rate < 5.0 {
        "good"
    } else if error_rate < 20.0 {
        "warning"
    } else {
        "error"
    };

    let _ = write!(
        html,
        "<div class=\"section\">\n<h2>Summary Metrics</h2>\n\
         <div class=\"metric {}\"><strong>Exact Match Accuracy:</strong><br>{:.2}% ({} / {})</div>\n\
         <div class=\"metric good\"><strong>Close Match Accuracy:</strong><br>{:.2}% (\u{2264}1 LSB error)</div>\n\
         <div class=\"metric {}\"><strong>Error Rate:</strong><br>{:.2}% ({} errors)</div>\n\
         <div class=\"metric\"><strong>Mean Error:</strong><br>{:.4} LSB</div>\n\
         <div class=\"metric\"><strong>Max Error:</strong><br>{:.4} LSB</div>\n\
         </div>\n",
        accuracy_class,
        accuracy,
        summary.exact_matches,
        summary.total_outputs,
        summary.close_match_percent(),
        error_class,
        error_rate,
        summary.total_errors,
        summary.mean_error,
        summary.max_error,
    );
}

fn push_channel_section(html: &mut String, channels: &[ChannelStats]) {
    if channels.is_empty() {
        return;
    }

    html.push_str(
        "<div class=\"section\">\n<h2>Channel-wise Analysis</h2>\n<table>\n\
         <tr><th>Channel</th><th>Count</th><th>Mean Value</th><th>Std Dev</th>\
         <th>Min</th><th>Max</th><th>Non-zero %</th></tr>\n",
    );

    for stats in channels {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{:.2}</td><td>{:.2}</td>\
             <td>{}</td><td>{}</td><td>{:.1}%</td></tr>\n",
            stats.channel,
            stats.count,
            stats.mean,
            stats.std_dev,
            stats.min,
            stats.max,
            stats.non_zero_fraction() * 100.0,
        );
    }

    html.push_str("</table>\n</div>\n");
}

fn push_plots_section(html: &mut String, plots_dir: &Path) {
    let mut plots: Vec<PathBuf> = match std::fs::read_dir(plots_dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .map(|ext| ext.eq_ignore_ascii_case("png"))
                    .unwrap_or(false)
            })
            .collect(),
        Err(_) => return,
    };
    if plots.is_empty() {
        return;
    }
    plots.sort();

    html.push_str("<div class=\"section\">\n<h2>Visualizations</h2>\n");
    for plot in plots {
        let title = plot
            .file_stem()
            .map(|s| s.to_string_lossy().replace('_', " "))
            .unwrap_or_default();
        let _ = write!(
            html,
            "<div class=\"plot\">\n<h3>{}</h3>\n\
             <img src=\"{}\" alt=\"{}\" style=\"max-width: 100%; height: auto;\">\n</div>\n",
            title,
            plot.display(),
            title,
        );
    }
    html.push_str("</div>\n");
}

fn push_assessment_section(html: &mut String, summary: &AnalysisSummary) {
    let assessment = Assessment::classify(summary.exact_match_percent(), summary.mean_error);
    let _ = write!(
        html,
        "<div class=\"section\">\n<h2>Overall Assessment</h2>\n\
         <div class=\"metric {}\"><strong>Assessment:</strong> {}</div>\n\
         <p>{}</p>\n</div>\n",
        assessment.css_class(),
        assessment.label(),
        assessment.description(),
    );
}
