/// Fraction of the sorted data below the first quartile.
pub const FIRST_QUARTILE: f64 = 0.25;
/// Fraction of the sorted data below the median.
pub const MEDIAN: f64 = 0.5;
/// Fraction of the sorted data below the third quartile.
pub const THIRD_QUARTILE: f64 = 0.75;

/// Computes a quantile of sorted data with the nearest-rank rule.
///
/// The value is taken at index `floor(n * fraction)` without interpolation,
/// clamped to the last element. Returns `None` if the input is empty.
///
/// # Examples
///
/// ```
/// use stratlab_stats::quantile::nearest_rank;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// assert_eq!(nearest_rank(&values, 0.25), Some(3.0));
/// assert_eq!(nearest_rank(&values, 0.5), Some(6.0));
/// assert_eq!(nearest_rank(&values, 1.0), Some(10.0));
/// assert_eq!(nearest_rank(&[], 0.5), None);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn nearest_rank(sorted_values: &[f64], fraction: f64) -> Option<f64> {
    debug_assert!(
        sorted_values.is_sorted_by(|a, b| a <= b),
        "values must be sorted in ascending order"
    );
    let last = sorted_values.len().checked_sub(1)?;
    let idx = (sorted_values.len() as f64 * fraction).floor() as usize;
    Some(sorted_values[idx.min(last)])
}
