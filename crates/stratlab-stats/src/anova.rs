//! One-way analysis of variance across groups.
//!
//! The F-statistic compares the variance between group means with the
//! variance inside the groups. The reported p-value is NOT an F-distribution
//! tail probability: it is the logistic proxy `1 / (1 + e^F)`, which shrinks
//! monotonically as F grows. Treat it as a rough indicator only.

use serde::Serialize;

use crate::{DegenerateInput, StatsError, dataset::Dataset, descriptive};

/// p-values below this threshold are reported as significant.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Result of a one-way ANOVA.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnovaResult {
    /// Mean of all samples across all groups.
    pub grand_mean: f64,
    /// Between-group sum of squares.
    pub ss_between: f64,
    /// Within-group sum of squares.
    pub ss_within: f64,
    /// Number of groups minus one.
    pub df_between: usize,
    /// Number of samples minus number of groups.
    pub df_within: usize,
    pub ms_between: f64,
    pub ms_within: f64,
    /// `ms_between / ms_within`. `+∞` when all within-group variance is zero
    /// and the group means differ; `NaN` when both mean squares are zero.
    pub f_statistic: f64,
    /// Logistic approximation `1 / (1 + e^F)`, see [`logistic_p_value`].
    pub p_value: f64,
}

impl AnovaResult {
    /// Runs a one-way ANOVA over the given groups.
    ///
    /// # Errors
    ///
    /// - [`StatsError::InsufficientGroups`] with fewer than two groups
    /// - [`StatsError::EmptyInput`] if any group has no samples
    /// - [`StatsError::Degenerate`] if no within-group degrees of freedom remain
    ///   (every group has a single sample)
    ///
    /// # Examples
    ///
    /// ```
    /// # use stratlab_stats::anova::AnovaResult;
    /// let anova = AnovaResult::new(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]).unwrap();
    /// assert_eq!(anova.df_between, 1);
    /// assert_eq!(anova.df_within, 4);
    /// assert_eq!(anova.f_statistic, 13.5);
    /// assert!(anova.is_significant());
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn new(groups: &[&[f64]]) -> Result<Self, StatsError> {
        let num_groups = groups.len();
        if num_groups < 2 {
            return Err(StatsError::InsufficientGroups { groups: num_groups });
        }
        let group_means = groups
            .iter()
            .map(|g| descriptive::mean(g).ok_or(StatsError::EmptyInput { group: None }))
            .collect::<Result<Vec<_>, _>>()?;

        let all = groups.concat();
        let total_samples = all.len();
        let grand_mean = descriptive::mean(&all).ok_or(StatsError::EmptyInput { group: None })?;

        let ss_between = groups
            .iter()
            .zip(&group_means)
            .map(|(g, m)| g.len() as f64 * (m - grand_mean).powi(2))
            .sum::<f64>();
        let ss_within = groups
            .iter()
            .zip(&group_means)
            .map(|(g, m)| g.iter().map(|v| (v - m).powi(2)).sum::<f64>())
            .sum::<f64>();

        let df_between = num_groups - 1;
        let df_within = total_samples - num_groups;
        if df_within == 0 {
            return Err(DegenerateInput::InsufficientDegreesOfFreedom {
                groups: num_groups,
                samples: total_samples,
            }
            .into());
        }

        let ms_between = ss_between / df_between as f64;
        let ms_within = ss_within / df_within as f64;
        let f_statistic = ms_between / ms_within;

        Ok(Self {
            grand_mean,
            ss_between,
            ss_within,
            df_between,
            df_within,
            ms_between,
            ms_within,
            f_statistic,
            p_value: logistic_p_value(f_statistic),
        })
    }

    /// Runs a one-way ANOVA over every group of the dataset, in order.
    pub fn from_dataset(dataset: &Dataset) -> Result<Self, StatsError> {
        let groups = dataset
            .groups()
            .iter()
            .map(|g| g.samples())
            .collect::<Vec<_>>();
        Self::new(&groups)
    }

    /// Whether `p_value < SIGNIFICANCE_LEVEL`.
    #[must_use]
    pub fn is_significant(&self) -> bool {
        self.p_value < SIGNIFICANCE_LEVEL
    }
}

/// Approximates a p-value from an F-statistic as `1 / (1 + e^F)`.
///
/// This is a logistic stand-in, not the F-distribution survival function:
/// `F = 0` maps to `0.5` and large F tends to `0`.
///
/// ```
/// # use stratlab_stats::anova::logistic_p_value;
/// assert_eq!(logistic_p_value(0.0), 0.5);
/// assert_eq!(logistic_p_value(f64::INFINITY), 0.0);
/// ```
#[must_use]
pub fn logistic_p_value(f_statistic: f64) -> f64 {
    1.0 / (1.0 + f_statistic.exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_groups() {
        let anova = AnovaResult::new(&[&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(anova.grand_mean, 2.0);
        assert_eq!(anova.ms_between, 0.0);
        assert_eq!(anova.ms_within, 1.0);
        assert_eq!(anova.f_statistic, 0.0);
        assert_eq!(anova.p_value, 0.5);
        assert!(!anova.is_significant());
    }

    #[test]
    fn test_separated_groups() {
        let anova = AnovaResult::new(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(anova.ss_between, 13.5);
        assert_eq!(anova.ss_within, 4.0);
        assert_eq!(anova.ms_between, 13.5);
        assert_eq!(anova.ms_within, 1.0);
        assert!((anova.p_value - 1.0 / (1.0 + 13.5_f64.exp())).abs() < 1e-15);
    }

    #[test]
    fn test_unequal_group_sizes() {
        let anova = AnovaResult::new(&[&[1.0, 3.0], &[2.0, 4.0, 6.0], &[5.0]]).unwrap();
        assert_eq!(anova.df_between, 2);
        assert_eq!(anova.df_within, 3);
        // means: 2, 4, 5; grand mean 21 / 6 = 3.5
        assert_eq!(anova.grand_mean, 3.5);
        let expected_ssb = 2.0 * 1.5_f64.powi(2) + 3.0 * 0.5_f64.powi(2) + 1.5_f64.powi(2);
        assert!((anova.ss_between - expected_ssb).abs() < 1e-12);
        assert_eq!(anova.ss_within, 2.0 + 8.0);
    }

    #[test]
    fn test_zero_within_variance() {
        let anova = AnovaResult::new(&[&[1.0, 1.0], &[2.0, 2.0]]).unwrap();
        assert_eq!(anova.ms_within, 0.0);
        assert_eq!(anova.f_statistic, f64::INFINITY);
        assert_eq!(anova.p_value, 0.0);
        assert!(anova.is_significant());

        let anova = AnovaResult::new(&[&[3.0, 3.0], &[3.0, 3.0]]).unwrap();
        assert!(anova.f_statistic.is_nan());
        assert!(!anova.is_significant());
    }

    #[test]
    fn test_no_within_degrees_of_freedom() {
        let err = AnovaResult::new(&[&[1.0], &[2.0]]).unwrap_err();
        assert_eq!(
            err,
            StatsError::Degenerate(DegenerateInput::InsufficientDegreesOfFreedom {
                groups: 2,
                samples: 2
            })
        );
    }

    #[test]
    fn test_insufficient_groups() {
        assert_eq!(
            AnovaResult::new(&[&[1.0, 2.0]]),
            Err(StatsError::InsufficientGroups { groups: 1 })
        );
        assert_eq!(
            AnovaResult::new(&[]),
            Err(StatsError::InsufficientGroups { groups: 0 })
        );
    }

    #[test]
    fn test_empty_group() {
        assert_eq!(
            AnovaResult::new(&[&[1.0, 2.0], &[]]),
            Err(StatsError::EmptyInput { group: None })
        );
    }

    #[test]
    fn test_from_dataset_matches_slices() {
        let dataset = Dataset::new([("a", vec![1.0, 5.0, 2.0]), ("b", vec![7.0, 3.0])]).unwrap();
        assert_eq!(
            AnovaResult::from_dataset(&dataset).unwrap(),
            AnovaResult::new(&[&[1.0, 5.0, 2.0], &[7.0, 3.0]]).unwrap()
        );
    }
}
