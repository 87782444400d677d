//! Analyze command
//!
//! Runs every statistic over the input table and prints the results as
//! plain-text tables or as a JSON document.

mod table;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use stratlab_stats::{
    analysis::Analysis,
    histogram::{BinCountBasis, DEFAULT_MAX_BINS, HistogramOptions},
};

use crate::{input::InputArg, util::Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct AnalyzeArg {
    #[clap(flatten)]
    input: InputArg,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Write the report to this file instead of standard output
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Upper bound on the number of histogram bins
    #[arg(long, default_value_t = DEFAULT_MAX_BINS)]
    max_bins: usize,

    /// Which sample count drives the ceil(sqrt(n)) histogram bin rule
    #[arg(long, value_enum, default_value_t = BinBasis::FirstGroup)]
    bin_basis: BinBasis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum BinBasis {
    /// Size of the first group
    FirstGroup,
    /// Number of samples across all groups
    TotalSamples,
}

impl From<BinBasis> for BinCountBasis {
    fn from(value: BinBasis) -> Self {
        match value {
            BinBasis::FirstGroup => BinCountBasis::FirstGroup,
            BinBasis::TotalSamples => BinCountBasis::TotalSamples,
        }
    }
}

/// JSON document written by `--format json`.
#[derive(Debug, Serialize)]
struct AnalysisReport<'a> {
    generated_at: DateTime<Utc>,
    input: String,
    histogram_options: HistogramOptions,
    /// How `anova.p_value` was derived from the F-statistic.
    p_value_method: &'static str,
    #[serde(flatten)]
    analysis: &'a Analysis,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    anyhow::ensure!(arg.max_bins > 0, "--max-bins must be at least 1");

    let dataset = arg.input.read_dataset()?;
    let histogram_options = HistogramOptions {
        max_bins: arg.max_bins,
        basis: arg.bin_basis.into(),
    };
    let analysis = Analysis::new(&dataset, &histogram_options);
    log_unavailable_sections(&analysis);

    let source = arg.input.display_name();
    let mut output = Output::from_output_path(arg.output.as_deref())?;
    match arg.format {
        ReportFormat::Text => {
            output.write_with(|out| table::write_report(out, &source, &analysis))?;
        }
        ReportFormat::Json => {
            let report = AnalysisReport {
                generated_at: Utc::now(),
                input: source,
                histogram_options,
                p_value_method: "logistic approximation 1 / (1 + e^F)",
                analysis: &analysis,
            };
            output.write_json(&report)?;
        }
    }

    if arg.output.is_some() {
        tracing::info!("report saved to {}", output.display_path());
    }
    Ok(())
}

fn log_unavailable_sections(analysis: &Analysis) {
    match &analysis.anova {
        Ok(anova) => tracing::debug!(
            f_statistic = anova.f_statistic,
            p_value = anova.p_value,
            "ANOVA computed"
        ),
        Err(err) if err.is_insufficient_groups() => tracing::info!("ANOVA skipped: {err}"),
        Err(err) => tracing::warn!("ANOVA unavailable: {err}"),
    }
    if let Err(err) = &analysis.histogram {
        tracing::warn!("histogram unavailable: {err}");
    }
    if let Err(err) = &analysis.correlation {
        tracing::warn!("correlation matrix unavailable: {err}");
    }
}
