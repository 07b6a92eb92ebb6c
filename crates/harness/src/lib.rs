//! QMem Verification Harness
//!
//! Compares accelerator output values against expected references and
//! turns the result into channel statistics, a qualitative assessment,
//! and an HTML report.

mod assessment;
mod channels;
mod compare;
mod error;
mod report;
mod summary;
pub mod testdata;

pub use assessment::Assessment;
pub use channels::{channel_distribution, ChannelStats};
pub use compare::{compare_outputs, PairwiseDiff};
pub use error::{HarnessError, Result};
pub use report::{build_report, write_report, ReportInputs};
pub use summary::AnalysisSummary;
