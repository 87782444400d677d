//! Statistical engine for comparing groups of numeric samples.
//!
//! Each group ("strategy") is a named sequence of scores. This crate turns a
//! validated [`Dataset`](dataset::Dataset) into a fixed set of summaries:
//!
//! - **Descriptive statistics**: mean, population standard deviation, min, max, count
//! - **One-way ANOVA**: sums of squares, mean squares, F-statistic and an approximate p-value
//! - **Box plots**: nearest-rank quartiles, Tukey whiskers and outliers
//! - **Histograms**: bins shared across all groups so distributions are comparable
//! - **Correlation matrix**: dense pairwise correlation between equal-length groups
//!
//! Every function is pure: results are fresh values computed from an
//! immutable dataset, and nothing here logs or performs I/O.
//!
//! # Modules
//!
//! - [`dataset`]: Validated group-name to samples mapping
//! - [`descriptive`]: Per-group summary statistics and the shared mean/std-dev helpers
//! - [`anova`]: One-way analysis of variance
//! - [`boxplot`]: Box-plot summaries
//! - [`quantile`]: Nearest-rank quantiles
//! - [`histogram`]: Shared-edge histogram binning
//! - [`correlation`]: Pairwise correlation matrix
//! - [`format`]: Display formatting for numbers, p-values and correlations
//! - [`analysis`]: Runs every component against one dataset
//!
//! # Examples
//!
//! ## Building a dataset and summarizing a group
//!
//! ```
//! use stratlab_stats::{dataset::Dataset, descriptive::SummaryStats};
//!
//! let dataset = Dataset::new([
//!     ("baseline", vec![1.0, 2.0, 3.0]),
//!     ("tuned", vec![4.0, 5.0, 6.0]),
//! ])
//! .unwrap();
//!
//! let stats = SummaryStats::new(dataset.groups()[0].samples()).unwrap();
//! assert_eq!(stats.mean, 2.0);
//! assert_eq!(dataset.grand_mean(), Some(3.5));
//! ```
//!
//! ## Running the one-way ANOVA
//!
//! ```
//! use stratlab_stats::anova::AnovaResult;
//!
//! let anova = AnovaResult::new(&[&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]]).unwrap();
//! assert_eq!(anova.f_statistic, 0.0);
//! assert_eq!(anova.p_value, 0.5);
//! ```
//!
//! ## Running every component at once
//!
//! ```
//! use stratlab_stats::{analysis::Analysis, dataset::Dataset, histogram::HistogramOptions};
//!
//! let dataset = Dataset::new([
//!     ("a", vec![1.0, 2.0, 3.0, 4.0]),
//!     ("b", vec![2.0, 4.0, 6.0, 8.0]),
//! ])
//! .unwrap();
//! let analysis = Analysis::new(&dataset, &HistogramOptions::default());
//!
//! assert_eq!(analysis.summaries.len(), 2);
//! assert!(analysis.anova.is_ok());
//! let correlation = analysis.correlation.unwrap();
//! assert!((correlation.get("a", "b").unwrap() - 1.0).abs() < 1e-9);
//! ```

pub mod analysis;
pub mod anova;
pub mod boxplot;
pub mod correlation;
pub mod dataset;
pub mod descriptive;
pub mod format;
pub mod histogram;
pub mod quantile;

/// Errors raised when the input cannot produce a meaningful result.
///
/// Numerically degenerate outputs that are still well defined (an infinite
/// F-statistic, a `NaN` correlation for a constant group) are returned as
/// values, not errors.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum StatsError {
    #[display("{}", describe_empty(group.as_deref()))]
    EmptyInput { group: Option<String> },
    #[display("degenerate input: {_0}")]
    Degenerate(#[error(source)] DegenerateInput),
    #[display("group '{group}' has {len} samples, expected {expected}")]
    LengthMismatch {
        group: String,
        len: usize,
        expected: usize,
    },
    #[display("need at least 2 groups, got {groups}")]
    InsufficientGroups { groups: usize },
    #[display("group name at position {index} is empty")]
    InvalidGroupName { index: usize },
    #[display("group '{group}' appears more than once")]
    DuplicateGroup { group: String },
    #[display("group '{group}' has a non-finite sample at index {index}")]
    NonFiniteSample { group: String, index: usize },
}

/// Inputs whose shape leaves a computation without a defined answer.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum DegenerateInput {
    #[display(
        "{samples} samples in {groups} groups leave no within-group degrees of freedom"
    )]
    InsufficientDegreesOfFreedom { groups: usize, samples: usize },
    #[display("every sample equals {value}, the histogram range has zero width")]
    ZeroWidthRange { value: f64 },
}

impl From<DegenerateInput> for StatsError {
    fn from(value: DegenerateInput) -> Self {
        Self::Degenerate(value)
    }
}

fn describe_empty(group: Option<&str>) -> String {
    match group {
        Some(group) => format!("group '{group}' has no samples"),
        None => "no samples to analyze".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StatsError::EmptyInput {
            group: Some("tuned".to_owned()),
        };
        assert_eq!(err.to_string(), "group 'tuned' has no samples");
        let err = StatsError::EmptyInput { group: None };
        assert_eq!(err.to_string(), "no samples to analyze");
    }

    #[test]
    fn test_degenerate_is_source() {
        let err = StatsError::from(DegenerateInput::ZeroWidthRange { value: 3.0 });
        assert!(err.is_degenerate());
        let source = err.source().unwrap();
        assert_eq!(
            source.to_string(),
            "every sample equals 3, the histogram range has zero width"
        );
    }
}
