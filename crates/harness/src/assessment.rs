//! Qualitative accuracy assessment

use std::fmt;

/// Overall accelerator accuracy tier, classified from exact-match
/// percentage and mean absolute error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assessment {
    Excellent,
    Good,
    Acceptable,
    NeedsImprovement,
}

impl Assessment {
    /// Classify from the summary metrics. Thresholds are fixed: they must
    /// match the ones baked into the historical sign-off reports.
    pub fn classify(exact_match_percent: f64, mean_error: f64) -> Self {
        if exact_match_percent > 95.0 && mean_error < 1.0 {
            Assessment::Excellent
        } else if exact_match_percent > 90.0 && mean_error < 2.0 {
            Assessment::Good
        } else if exact_match_percent > 80.0 {
            Assessment::Acceptable
        } else {
            Assessment::NeedsImprovement
        }
    }

    /// Short label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Assessment::Excellent => "EXCELLENT",
            Assessment::Good => "GOOD",
            Assessment::Acceptable => "ACCEPTABLE",
            Assessment::NeedsImprovement => "NEEDS IMPROVEMENT",
        }
    }

    /// One-sentence explanation for the report
    pub fn description(&self) -> &'static str {
        match self {
            Assessment::Excellent => {
                "The accelerator shows excellent accuracy with very low error rates."
            }
            Assessment::Good => {
                "The accelerator shows good accuracy with acceptable error rates."
            }
            Assessment::Acceptable => {
                "The accelerator shows acceptable accuracy but may need optimization."
            }
            Assessment::NeedsImprovement => {
                "The accelerator shows significant accuracy issues that need to be addressed."
            }
        }
    }

    /// CSS class used by the HTML report
    pub fn css_class(&self) -> &'static str {
        match self {
            Assessment::Excellent | Assessment::Good => "good",
            Assessment::Acceptable => "warning",
            Assessment::NeedsImprovement => "error",
        }
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
