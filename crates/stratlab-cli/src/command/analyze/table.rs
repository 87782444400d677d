//! Plain-text report
//!
//! Renders an [`Analysis`] as a sequence of aligned tables, one per section.
//! Sections that could not be computed print their error instead.

use std::io::{self, Write};

use stratlab_stats::{
    StatsError,
    analysis::Analysis,
    anova::{AnovaResult, SIGNIFICANCE_LEVEL},
    correlation::CorrelationMatrix,
    format::{format_correlation, format_number, format_p_value},
    histogram::Histogram,
};

const LABEL_WIDTH: usize = 20;
const VALUE_WIDTH: usize = 12;

pub(super) fn write_report<W>(out: &mut W, source: &str, analysis: &Analysis) -> io::Result<()>
where
    W: Write,
{
    let label_width = analysis
        .summaries
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(LABEL_WIDTH);

    writeln!(out, "Analysis of {source}")?;
    if let Some(grand_mean) = analysis.grand_mean {
        writeln!(out, "Grand mean: {}", format_number(grand_mean))?;
    }

    write_summaries(out, analysis, label_width)?;
    write_anova(out, &analysis.anova)?;
    write_box_plots(out, analysis, label_width)?;
    write_histogram(out, &analysis.histogram)?;
    write_correlation(out, &analysis.correlation, label_width)?;
    Ok(())
}

fn write_heading<W>(out: &mut W, title: &str) -> io::Result<()>
where
    W: Write,
{
    writeln!(out)?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))
}

fn write_separator<W>(
    out: &mut W,
    label_width: usize,
    columns: usize,
    column_width: usize,
) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, "  {}", "-".repeat(label_width + columns * (column_width + 1)))
}

fn write_summaries<W>(out: &mut W, analysis: &Analysis, label_width: usize) -> io::Result<()>
where
    W: Write,
{
    write_heading(out, "Summary statistics")?;
    writeln!(
        out,
        "  {:<label_width$} {:>VALUE_WIDTH$} {:>VALUE_WIDTH$} {:>VALUE_WIDTH$} {:>VALUE_WIDTH$} {:>8}",
        "Group", "Mean", "Std Dev", "Min", "Max", "Samples",
    )?;
    write_separator(out, label_width + 9, 4, VALUE_WIDTH)?;
    for summary in &analysis.summaries {
        let stats = &summary.stats;
        writeln!(
            out,
            "  {:<label_width$} {:>VALUE_WIDTH$} {:>VALUE_WIDTH$} {:>VALUE_WIDTH$} {:>VALUE_WIDTH$} {:>8}",
            summary.name,
            format_number(stats.mean),
            format_number(stats.std_dev),
            format_number(stats.min),
            format_number(stats.max),
            stats.count,
        )?;
    }
    Ok(())
}

fn write_anova<W>(out: &mut W, anova: &Result<AnovaResult, StatsError>) -> io::Result<()>
where
    W: Write,
{
    write_heading(out, "One-way ANOVA")?;
    let anova = match anova {
        Ok(anova) => anova,
        Err(err) if err.is_insufficient_groups() => {
            return writeln!(out, "  Add at least 2 groups to perform ANOVA analysis.");
        }
        Err(err) => return writeln!(out, "  Unavailable: {err}"),
    };

    let significance = if anova.is_significant() {
        format!("significant (p < {SIGNIFICANCE_LEVEL})")
    } else {
        format!("not significant (p >= {SIGNIFICANCE_LEVEL})")
    };
    let rows = [
        ("Critical Mean", format_number(anova.grand_mean)),
        ("F-statistic", format_number(anova.f_statistic)),
        ("P-value (approx.)", format_p_value(anova.p_value)),
        ("Significance", significance),
        ("SS between", format_number(anova.ss_between)),
        ("SS within", format_number(anova.ss_within)),
        ("df between", anova.df_between.to_string()),
        ("df within", anova.df_within.to_string()),
        ("MS between", format_number(anova.ms_between)),
        ("MS within", format_number(anova.ms_within)),
    ];
    for (label, value) in rows {
        writeln!(out, "  {label:<LABEL_WIDTH$} {value}")?;
    }
    writeln!(
        out,
        "  Note: the p-value is the logistic approximation 1 / (1 + e^F), not an F-distribution tail."
    )
}

fn write_box_plots<W>(out: &mut W, analysis: &Analysis, label_width: usize) -> io::Result<()>
where
    W: Write,
{
    write_heading(out, "Box plots")?;
    writeln!(
        out,
        "  {:<label_width$} {:>VALUE_WIDTH$} {:>VALUE_WIDTH$} {:>VALUE_WIDTH$} {:>VALUE_WIDTH$} {:>VALUE_WIDTH$}  Outliers",
        "Group", "Whisker Low", "Q1", "Median", "Q3", "Whisker High",
    )?;
    write_separator(out, label_width + 10, 5, VALUE_WIDTH)?;
    for box_plot in &analysis.box_plots {
        let stats = &box_plot.stats;
        let outliers = if stats.outliers.is_empty() {
            "-".to_owned()
        } else {
            stats
                .outliers
                .iter()
                .map(|&v| format_number(v))
                .collect::<Vec<_>>()
                .join(", ")
        };
        writeln!(
            out,
            "  {:<label_width$} {:>VALUE_WIDTH$} {:>VALUE_WIDTH$} {:>VALUE_WIDTH$} {:>VALUE_WIDTH$} {:>VALUE_WIDTH$}  {outliers}",
            box_plot.name,
            format_number(stats.whisker_low),
            format_number(stats.q1),
            format_number(stats.median),
            format_number(stats.q3),
            format_number(stats.whisker_high),
        )?;
    }
    Ok(())
}

fn write_histogram<W>(out: &mut W, histogram: &Result<Histogram, StatsError>) -> io::Result<()>
where
    W: Write,
{
    write_heading(out, "Histogram")?;
    let histogram = match histogram {
        Ok(histogram) => histogram,
        Err(err) => return writeln!(out, "  Unavailable: {err}"),
    };

    let labels = histogram
        .bins
        .iter()
        .map(|bin| format!("{} - {}", format_number(bin.start), format_number(bin.end)))
        .collect::<Vec<_>>();
    let label_width = labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(LABEL_WIDTH);
    let column_width = histogram
        .groups
        .iter()
        .map(|g| g.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(8);

    write!(out, "  {:<label_width$}", "Bin")?;
    for group in &histogram.groups {
        write!(out, " {:>column_width$}", group.name)?;
    }
    writeln!(out)?;
    write_separator(out, label_width, histogram.groups.len(), column_width)?;
    for (i, label) in labels.iter().enumerate() {
        write!(out, "  {label:<label_width$}")?;
        for group in &histogram.groups {
            write!(out, " {:>column_width$}", group.counts[i])?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_correlation<W>(
    out: &mut W,
    matrix: &Result<CorrelationMatrix, StatsError>,
    label_width: usize,
) -> io::Result<()>
where
    W: Write,
{
    write_heading(out, "Correlation matrix")?;
    let matrix = match matrix {
        Ok(matrix) => matrix,
        Err(err) => return writeln!(out, "  Unavailable: {err}"),
    };

    let column_width = matrix
        .names()
        .iter()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0)
        .max(8);

    write!(out, "  {:<label_width$}", "")?;
    for name in matrix.names() {
        write!(out, " {name:>column_width$}")?;
    }
    writeln!(out)?;
    write_separator(out, label_width, matrix.len(), column_width)?;
    for (name, row) in matrix.names().iter().zip(matrix.rows()) {
        write!(out, "  {name:<label_width$}")?;
        for &value in row {
            write!(out, " {:>column_width$}", format_correlation(value))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use stratlab_stats::{dataset::Dataset, histogram::HistogramOptions};

    use super::*;

    fn render(dataset: &Dataset) -> String {
        let analysis = Analysis::new(dataset, &HistogramOptions::default());
        let mut buf = vec![];
        write_report(&mut buf, "scores.tsv", &analysis).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_full_report() {
        let dataset = Dataset::new([
            ("baseline", vec![1_200.0, 1_500.0, 1_100.0, 1_400.0]),
            ("greedy", vec![1_800.0, 2_100.0, 1_700.0, 2_000.0]),
        ])
        .unwrap();
        let text = render(&dataset);

        assert!(text.starts_with("Analysis of scores.tsv\n"));
        assert!(text.contains("Grand mean: 1,600\n"));
        assert!(text.contains("Summary statistics\n"));
        assert!(text.contains("1,300"));
        assert!(text.contains("1,900"));
        assert!(text.contains("  Critical Mean        1,600\n"));
        assert!(text.contains("  df between           1\n"));
        assert!(text.contains("  df within            6\n"));
        assert!(text.contains("logistic approximation"));
        assert!(text.contains("Box plots\n"));
        assert!(text.contains("Histogram\n"));
        assert!(text.contains("Correlation matrix\n"));
        assert!(text.contains("1.000"));
    }

    #[test]
    fn test_single_group() {
        let dataset = Dataset::new([("only", vec![1.0, 2.0, 3.0])]).unwrap();
        let text = render(&dataset);

        assert!(text.contains("  Add at least 2 groups to perform ANOVA analysis.\n"));
        assert!(!text.contains("F-statistic"));
        // a single group still gets a 1x1 correlation matrix
        assert!(text.contains("1.000"));
    }

    #[test]
    fn test_unavailable_sections() {
        let dataset = Dataset::new([("a", vec![4.0, 4.0]), ("b", vec![4.0])]).unwrap();
        let text = render(&dataset);

        assert!(text.contains("Histogram\n=========\n  Unavailable: degenerate input"));
        assert!(text.contains("  Unavailable: group 'b' has 1 samples, expected 2\n"));
        // F is 0/0 here
        assert!(text.contains("  F-statistic          NaN\n"));
    }

    #[test]
    fn test_outliers_listed() {
        let mut samples = vec![10.0; 9];
        samples.push(1_000.0);
        let dataset = Dataset::new([("a", samples.clone()), ("b", samples)]).unwrap();
        let text = render(&dataset);

        let row = text
            .lines()
            .find(|line| line.starts_with("  a ") && line.ends_with("1,000"))
            .unwrap();
        assert!(row.contains("  1,000"));
        assert!(text.lines().all(|line| !line.ends_with("  -")));
    }
}
