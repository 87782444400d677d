use serde::{Serialize, Serializer};

use crate::{
    StatsError,
    anova::AnovaResult,
    boxplot::BoxPlotStats,
    correlation::CorrelationMatrix,
    dataset::Dataset,
    descriptive::SummaryStats,
    histogram::{Histogram, HistogramOptions},
};

/// Every summary of one dataset snapshot.
///
/// Each section is computed independently. A section that cannot be computed
/// for this input (too few groups for ANOVA, unequal lengths for the
/// correlation matrix, ...) keeps its error while the others are still filled
/// in. When serialized, a failed section becomes `{ "error": "<message>" }`.
///
/// # Examples
///
/// ```
/// use stratlab_stats::{analysis::Analysis, dataset::Dataset, histogram::HistogramOptions};
///
/// let dataset = Dataset::new([("only", vec![1.0, 2.0, 3.0])]).unwrap();
/// let analysis = Analysis::new(&dataset, &HistogramOptions::default());
///
/// assert_eq!(analysis.grand_mean, Some(2.0));
/// assert_eq!(analysis.box_plots[0].stats.median, 2.0);
/// // a single group is not enough for ANOVA
/// assert!(analysis.anova.unwrap_err().is_insufficient_groups());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Mean of all samples of all groups.
    pub grand_mean: Option<f64>,
    pub summaries: Vec<GroupSummary>,
    #[serde(serialize_with = "serialize_section")]
    pub anova: Result<AnovaResult, StatsError>,
    pub box_plots: Vec<GroupBoxPlot>,
    #[serde(serialize_with = "serialize_section")]
    pub histogram: Result<Histogram, StatsError>,
    #[serde(serialize_with = "serialize_section")]
    pub correlation: Result<CorrelationMatrix, StatsError>,
}

/// Descriptive statistics of one named group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub name: String,
    #[serde(flatten)]
    pub stats: SummaryStats,
}

/// Box-plot summary of one named group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupBoxPlot {
    pub name: String,
    #[serde(flatten)]
    pub stats: BoxPlotStats,
}

impl Analysis {
    /// Runs every component against `dataset`.
    #[must_use]
    pub fn new(dataset: &Dataset, histogram_options: &HistogramOptions) -> Self {
        // Dataset groups are never empty, so per-group summaries always succeed.
        let summaries = dataset
            .groups()
            .iter()
            .filter_map(|g| {
                let stats = SummaryStats::new(g.samples()).ok()?;
                Some(GroupSummary {
                    name: g.name().to_owned(),
                    stats,
                })
            })
            .collect();
        let box_plots = dataset
            .groups()
            .iter()
            .filter_map(|g| {
                let stats = BoxPlotStats::new(g.samples()).ok()?;
                Some(GroupBoxPlot {
                    name: g.name().to_owned(),
                    stats,
                })
            })
            .collect();

        Self {
            grand_mean: dataset.grand_mean(),
            summaries,
            anova: AnovaResult::from_dataset(dataset),
            box_plots,
            histogram: Histogram::from_dataset(dataset, histogram_options),
            correlation: CorrelationMatrix::from_dataset(dataset),
        }
    }
}

fn serialize_section<T, S>(section: &Result<T, StatsError>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    #[derive(Serialize)]
    #[serde(untagged)]
    enum Section<'a, T> {
        Value(&'a T),
        Failed { error: String },
    }

    match section {
        Ok(value) => Section::Value(value),
        Err(err) => Section::Failed {
            error: err.to_string(),
        },
    }
    .serialize(serializer)
}
