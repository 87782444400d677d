use serde::Serialize;

use crate::{
    StatsError,
    dataset::{Dataset, Group},
    descriptive,
};

/// Dense pairwise correlation between all groups of a dataset.
///
/// Entry `(a, b)` is the population covariance of `a` and `b` divided by
/// the product of their population standard deviations. Values are not
/// clamped: a group with zero variance yields `NaN` in its row and column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    names: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Computes the correlation of every ordered pair of groups.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::LengthMismatch`] naming the first group whose
    /// length differs from the first group's.
    ///
    /// # Examples
    ///
    /// ```
    /// # use stratlab_stats::{correlation::CorrelationMatrix, dataset::Dataset};
    /// let dataset = Dataset::new([
    ///     ("up", vec![1.0, 2.0, 3.0]),
    ///     ("down", vec![6.0, 4.0, 2.0]),
    /// ])
    /// .unwrap();
    /// let matrix = CorrelationMatrix::from_dataset(&dataset).unwrap();
    /// assert!((matrix.get("up", "down").unwrap() + 1.0).abs() < 1e-9);
    /// ```
    pub fn from_dataset(dataset: &Dataset) -> Result<Self, StatsError> {
        let expected = dataset.groups().first().map_or(0, Group::len);
        if let Some(group) = dataset.groups().iter().find(|g| g.len() != expected) {
            return Err(StatsError::LengthMismatch {
                group: group.name().to_owned(),
                len: group.len(),
                expected,
            });
        }

        let values = dataset
            .groups()
            .iter()
            .map(|a| {
                dataset
                    .groups()
                    .iter()
                    .map(|b| correlation(a.samples(), b.samples()))
                    .collect()
            })
            .collect();

        Ok(Self {
            names: dataset.names().map(str::to_owned).collect(),
            values,
        })
    }

    /// Group names, in the order of rows and columns.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Matrix rows, aligned with [`Self::names`].
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Correlation between two groups, looked up by name.
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.names.iter().position(|n| n == a)?;
        let j = self.names.iter().position(|n| n == b)?;
        Some(self.values[i][j])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Population covariance divided by the product of population standard
/// deviations. `NaN` when either input is empty or constant.
///
/// Both slices must have the same length.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn correlation(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "inputs must have the same length");
    let (Some(mean_a), Some(mean_b)) = (descriptive::mean(a), descriptive::mean(b)) else {
        return f64::NAN;
    };
    let covariance = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - mean_a) * (y - mean_b))
        .sum::<f64>()
        / a.len() as f64;
    let (Some(std_a), Some(std_b)) = (
        descriptive::population_std_dev(a),
        descriptive::population_std_dev(b),
    ) else {
        return f64::NAN;
    };
    covariance / (std_a * std_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new([
            ("a", vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            ("b", vec![2.0, 4.0, 5.0, 4.0, 5.0]),
            ("c", vec![9.5, 3.25, 7.0, 1.0, 0.5]),
        ])
        .unwrap()
    }

    #[test]
    fn test_diagonal_is_one() {
        let matrix = CorrelationMatrix::from_dataset(&dataset()).unwrap();
        for (i, row) in matrix.rows().iter().enumerate() {
            assert!((row[i] - 1.0).abs() < 1e-9, "{}: {}", matrix.names()[i], row[i]);
        }
    }

    #[test]
    fn test_symmetric() {
        let matrix = CorrelationMatrix::from_dataset(&dataset()).unwrap();
        for a in matrix.names() {
            for b in matrix.names() {
                assert_eq!(matrix.get(a, b), matrix.get(b, a));
            }
        }
    }

    #[test]
    fn test_known_value() {
        let matrix = CorrelationMatrix::from_dataset(&dataset()).unwrap();
        // cov = 1.2, std_a = sqrt(2), std_b = sqrt(1.2)
        let expected = 1.2 / (2.0_f64.sqrt() * 1.2_f64.sqrt());
        assert!((matrix.get("a", "b").unwrap() - expected).abs() < 1e-12);
        assert!(matrix.get("a", "missing").is_none());
    }

    #[test]
    fn test_constant_group_is_nan() {
        let dataset = Dataset::new([("a", vec![1.0, 2.0, 3.0]), ("flat", vec![4.0; 3])]).unwrap();
        let matrix = CorrelationMatrix::from_dataset(&dataset).unwrap();
        assert!(matrix.get("a", "flat").unwrap().is_nan());
        assert!(matrix.get("flat", "flat").unwrap().is_nan());
        assert!((matrix.get("a", "a").unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_length_mismatch() {
        let dataset = Dataset::new([
            ("a", vec![1.0, 2.0, 3.0]),
            ("b", vec![1.0, 2.0, 3.0]),
            ("c", vec![1.0, 2.0]),
        ])
        .unwrap();
        assert_eq!(
            CorrelationMatrix::from_dataset(&dataset),
            Err(StatsError::LengthMismatch {
                group: "c".to_owned(),
                len: 2,
                expected: 3,
            })
        );
    }

    #[test]
    fn test_empty_dataset() {
        let matrix = CorrelationMatrix::from_dataset(&Dataset::default()).unwrap();
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_repeatable() {
        let dataset = dataset();
        let first = CorrelationMatrix::from_dataset(&dataset).unwrap();
        let second = CorrelationMatrix::from_dataset(&dataset).unwrap();
        for (x, y) in first.rows().iter().flatten().zip(second.rows().iter().flatten()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }
}
