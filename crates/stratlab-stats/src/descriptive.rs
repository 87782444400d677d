use serde::Serialize;

use crate::StatsError;

/// Descriptive statistics summarizing one group of samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    /// The arithmetic mean of the samples.
    pub mean: f64,
    /// The population standard deviation (divisor `count`, not `count - 1`).
    pub std_dev: f64,
    /// The minimum sample.
    pub min: f64,
    /// The maximum sample.
    pub max: f64,
    /// The number of samples.
    pub count: usize,
}

impl SummaryStats {
    /// Computes descriptive statistics from unsorted samples.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::EmptyInput`] if `samples` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use stratlab_stats::descriptive::SummaryStats;
    /// let stats = SummaryStats::new(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
    /// assert_eq!(stats.mean, 5.0);
    /// assert_eq!(stats.std_dev, 2.0);
    /// assert_eq!(stats.min, 2.0);
    /// assert_eq!(stats.max, 9.0);
    /// assert_eq!(stats.count, 8);
    /// ```
    pub fn new(samples: &[f64]) -> Result<Self, StatsError> {
        let (Some(mean), Some(std_dev)) = (mean(samples), population_std_dev(samples)) else {
            return Err(StatsError::EmptyInput { group: None });
        };
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            // Rounding in the sum can land the mean just outside [min, max].
            mean: mean.clamp(min, max),
            std_dev,
            min,
            max,
            count: samples.len(),
        })
    }
}

/// Arithmetic mean, or `None` for an empty slice.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation: the square root of the mean squared
/// deviation from the mean. `None` for an empty slice.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}
