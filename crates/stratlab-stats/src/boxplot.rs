use serde::Serialize;

use crate::{
    StatsError,
    quantile::{self, FIRST_QUARTILE, MEDIAN, THIRD_QUARTILE},
};

/// Whisker reach as a multiple of the interquartile range.
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Box-plot summary of one group.
///
/// Quartiles use the nearest-rank rule (see [`quantile::nearest_rank`]) and
/// whiskers extend at most [`WHISKER_IQR_FACTOR`] interquartile ranges past
/// the box, never beyond the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotStats {
    /// Lower whisker: `max(min, q1 - 1.5 * iqr)`.
    pub whisker_low: f64,
    /// First quartile.
    pub q1: f64,
    /// Median.
    pub median: f64,
    /// Third quartile.
    pub q3: f64,
    /// Upper whisker: `min(max, q3 + 1.5 * iqr)`.
    pub whisker_high: f64,
    /// Samples strictly outside the whiskers, in ascending order.
    pub outliers: Vec<f64>,
}

impl BoxPlotStats {
    /// Computes a box-plot summary from unsorted samples.
    ///
    /// # Examples
    ///
    /// ```
    /// # use stratlab_stats::boxplot::BoxPlotStats;
    /// let stats = BoxPlotStats::new(&[10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]).unwrap();
    /// assert_eq!(stats.q1, 3.0);
    /// assert_eq!(stats.median, 6.0);
    /// assert_eq!(stats.q3, 8.0);
    /// assert!(stats.outliers.is_empty());
    /// ```
    pub fn new(samples: &[f64]) -> Result<Self, StatsError> {
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Computes a box-plot summary from pre-sorted samples.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    pub fn from_sorted(sorted_values: &[f64]) -> Result<Self, StatsError> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        let (Some(&min), Some(&max)) = (sorted_values.first(), sorted_values.last()) else {
            return Err(StatsError::EmptyInput { group: None });
        };
        let quartile = |fraction| quantile::nearest_rank(sorted_values, fraction).unwrap_or(min);
        let q1 = quartile(FIRST_QUARTILE);
        let median = quartile(MEDIAN);
        let q3 = quartile(THIRD_QUARTILE);

        let iqr = q3 - q1;
        let whisker_low = f64::max(min, q1 - WHISKER_IQR_FACTOR * iqr);
        let whisker_high = f64::min(max, q3 + WHISKER_IQR_FACTOR * iqr);
        let outliers = sorted_values
            .iter()
            .copied()
            .filter(|&v| v < whisker_low || v > whisker_high)
            .collect();

        Ok(Self {
            whisker_low,
            q1,
            median,
            q3,
            whisker_high,
            outliers,
        })
    }

    /// Interquartile range.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_rank_quartiles() {
        let samples = (1..=10).map(f64::from).collect::<Vec<_>>();
        let stats = BoxPlotStats::new(&samples).unwrap();
        assert_eq!(stats.q1, 3.0);
        assert_eq!(stats.median, 6.0);
        assert_eq!(stats.q3, 8.0);
        assert_eq!(stats.iqr(), 5.0);
        assert_eq!(stats.whisker_low, 1.0);
        assert_eq!(stats.whisker_high, 10.0);
    }

    #[test]
    fn test_outliers_beyond_whiskers() {
        let stats = BoxPlotStats::new(&[100.0, 2.0, -50.0, 3.0, 4.0, 1.0, 2.0, 3.0]).unwrap();
        // sorted: [-50, 1, 2, 2, 3, 3, 4, 100]
        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.q3, 4.0);
        assert_eq!(stats.whisker_low, -1.0);
        assert_eq!(stats.whisker_high, 7.0);
        assert_eq!(stats.outliers, vec![-50.0, 100.0]);
    }

    #[test]
    fn test_constant_samples() {
        let stats = BoxPlotStats::new(&[4.0; 5]).unwrap();
        assert_eq!(stats.whisker_low, 4.0);
        assert_eq!(stats.whisker_high, 4.0);
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn test_empty_samples() {
        assert_eq!(
            BoxPlotStats::new(&[]),
            Err(StatsError::EmptyInput { group: None })
        );
    }

    #[test]
    #[should_panic(expected = "values must be sorted")]
    fn test_from_sorted_rejects_unsorted() {
        let _ = BoxPlotStats::from_sorted(&[3.0, 1.0]);
    }
}
