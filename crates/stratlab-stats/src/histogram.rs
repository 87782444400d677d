use std::ops::Range;

use serde::Serialize;

use crate::{DegenerateInput, StatsError, dataset::Dataset};

/// Upper bound on the number of bins unless overridden.
pub const DEFAULT_MAX_BINS: usize = 20;

/// Which sample count drives the `ceil(sqrt(n))` bin-count rule.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BinCountBasis {
    /// `n` is the size of the first group in the dataset.
    #[default]
    FirstGroup,
    /// `n` is the number of samples across all groups.
    TotalSamples,
}

/// Parameters of the bin-count rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistogramOptions {
    pub max_bins: usize,
    pub basis: BinCountBasis,
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self {
            max_bins: DEFAULT_MAX_BINS,
            basis: BinCountBasis::default(),
        }
    }
}

/// A histogram whose bins are shared by every group.
///
/// The bin range spans the minimum and maximum over the union of all groups,
/// so the per-group frequency counts can be compared directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Bin ranges (inclusive start, exclusive end). The last bin also holds
    /// the global maximum.
    pub bins: Vec<Range<f64>>,
    /// Frequency counts per group, in dataset order.
    pub groups: Vec<GroupCounts>,
}

/// Frequency counts of one group, aligned with [`Histogram::bins`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCounts {
    pub name: String,
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Bins every group of the dataset over shared edges.
    ///
    /// # Errors
    ///
    /// - [`StatsError::EmptyInput`] if the dataset has no groups
    /// - [`StatsError::Degenerate`] if every sample has the same value
    ///
    /// # Examples
    ///
    /// ```
    /// # use stratlab_stats::{dataset::Dataset, histogram::{Histogram, HistogramOptions}};
    /// let dataset = Dataset::new([
    ///     ("a", vec![0.0, 1.0, 2.0, 3.0]),
    ///     ("b", vec![4.0, 4.0, 4.0, 4.0]),
    /// ])
    /// .unwrap();
    /// let histogram = Histogram::from_dataset(&dataset, &HistogramOptions::default()).unwrap();
    ///
    /// // ceil(sqrt(4)) = 2 bins over [0, 4]
    /// assert_eq!(histogram.bins, vec![0.0..2.0, 2.0..4.0]);
    /// assert_eq!(histogram.counts_for("a"), Some(&[2, 2][..]));
    /// assert_eq!(histogram.counts_for("b"), Some(&[0, 4][..]));
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    pub fn from_dataset(dataset: &Dataset, options: &HistogramOptions) -> Result<Self, StatsError> {
        let Some(first) = dataset.groups().first() else {
            return Err(StatsError::EmptyInput { group: None });
        };
        let min = dataset.samples().fold(f64::INFINITY, f64::min);
        let max = dataset.samples().fold(f64::NEG_INFINITY, f64::max);
        if max <= min {
            return Err(DegenerateInput::ZeroWidthRange { value: min }.into());
        }

        let n = match options.basis {
            BinCountBasis::FirstGroup => first.len(),
            BinCountBasis::TotalSamples => dataset.total_samples(),
        };
        let num_bins = bin_count(n, options.max_bins);
        let bin_size = (max - min) / num_bins as f64;

        // Edges are recomputed from the index to avoid accumulating error.
        let bins = (0..num_bins)
            .map(|i| (min + i as f64 * bin_size)..(min + (i + 1) as f64 * bin_size))
            .collect();

        let groups = dataset
            .groups()
            .iter()
            .map(|group| {
                let mut counts = vec![0; num_bins];
                for &value in group.samples() {
                    let idx = ((value - min) / bin_size).floor() as usize;
                    counts[idx.min(num_bins - 1)] += 1;
                }
                GroupCounts {
                    name: group.name().to_owned(),
                    counts,
                }
            })
            .collect();

        Ok(Self { bins, groups })
    }

    #[must_use]
    pub fn counts_for(&self, name: &str) -> Option<&[u64]> {
        self.groups
            .iter()
            .find(|g| g.name == name)
            .map(|g| g.counts.as_slice())
    }
}

/// Number of bins for `n` samples: `ceil(sqrt(n))`, capped at `max_bins`,
/// and never less than one.
///
/// ```
/// # use stratlab_stats::histogram::bin_count;
/// assert_eq!(bin_count(10, 20), 4);
/// assert_eq!(bin_count(1000, 20), 20);
/// assert_eq!(bin_count(0, 20), 1);
/// ```
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]
#[must_use]
pub fn bin_count(n: usize, max_bins: usize) -> usize {
    let by_size = (n as f64).sqrt().ceil() as usize;
    by_size.min(max_bins).max(1)
}
