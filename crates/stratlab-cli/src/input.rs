//! Input table ingestion
//!
//! Turns pasted tab-separated text or a CSV file into a validated
//! [`Dataset`]. The first row holds the group names, every following row
//! holds one sample per group.

use std::path::{Path, PathBuf};

use anyhow::Context;
use stratlab_stats::{StatsError, dataset::Dataset};

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct InputArg {
    /// Path to the input table; reads standard input when omitted or `-`
    input: Option<PathBuf>,
    /// Format of the input table (auto: `.csv` files are CSV, anything else is tab-separated)
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    input_format: InputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum InputFormat {
    Auto,
    /// Tab-separated header, whitespace-separated values (spreadsheet paste)
    Tsv,
    /// Comma-separated values with optional quoting
    Csv,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub(crate) enum InputError {
    #[display("input must have at least a header row and one data row")]
    MissingRows,
    #[display("input must have at least 2 columns, found {found}")]
    TooFewColumns { found: usize },
    #[display("row {row} has {found} columns, expected {expected}")]
    ColumnCount {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[display("invalid number in row {row}, column {column}: \"{value}\"")]
    InvalidNumber {
        row: usize,
        column: usize,
        value: String,
    },
    #[display("malformed CSV")]
    Csv(#[error(source)] csv::Error),
    #[display("invalid dataset")]
    Dataset(#[error(source)] StatsError),
}

impl InputArg {
    fn path(&self) -> Option<&Path> {
        self.input.as_deref().filter(|p| *p != Path::new("-"))
    }

    pub(crate) fn display_name(&self) -> String {
        self.path()
            .map_or_else(|| "stdin".to_owned(), |p| p.display().to_string())
    }

    fn resolved_format(&self) -> InputFormat {
        match self.input_format {
            InputFormat::Auto => {
                let is_csv = self
                    .path()
                    .and_then(Path::extension)
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
                if is_csv {
                    InputFormat::Csv
                } else {
                    InputFormat::Tsv
                }
            }
            format => format,
        }
    }

    pub(crate) fn read_dataset(&self) -> anyhow::Result<Dataset> {
        let text = util::read_to_string(self.path())?;
        let format = self.resolved_format();
        tracing::debug!(source = %self.display_name(), ?format, "parsing input table");

        let dataset = parse(&text, format)
            .with_context(|| format!("Failed to parse input table: {}", self.display_name()))?;
        tracing::info!(
            groups = dataset.len(),
            samples = dataset.total_samples(),
            "loaded dataset"
        );
        Ok(dataset)
    }
}

pub(crate) fn parse(text: &str, format: InputFormat) -> Result<Dataset, InputError> {
    match format {
        InputFormat::Csv => parse_csv(text),
        InputFormat::Tsv | InputFormat::Auto => parse_tsv(text),
    }
}

/// Parses text pasted from a spreadsheet.
///
/// The header is split on tabs so group names may contain spaces; data rows
/// are split on any whitespace. Thousands separators are ignored.
pub(crate) fn parse_tsv(text: &str) -> Result<Dataset, InputError> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let header = lines.next().ok_or(InputError::MissingRows)?;
    let rows = lines.collect::<Vec<_>>();
    if rows.is_empty() {
        return Err(InputError::MissingRows);
    }

    let names = header
        .split('\t')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>();
    if names.len() < 2 {
        return Err(InputError::TooFewColumns { found: names.len() });
    }

    let mut columns = vec![Vec::with_capacity(rows.len()); names.len()];
    for (i, line) in rows.iter().enumerate() {
        // 1-based, counting the header as row 1
        let row = i + 2;
        let values = line.split_whitespace().collect::<Vec<_>>();
        if values.len() != names.len() {
            return Err(InputError::ColumnCount {
                row,
                found: values.len(),
                expected: names.len(),
            });
        }
        for (j, value) in values.into_iter().enumerate() {
            let number =
                parse_number(&value.replace(',', "")).ok_or_else(|| InputError::InvalidNumber {
                    row,
                    column: j + 1,
                    value: value.to_owned(),
                })?;
            columns[j].push(number);
        }
    }

    Dataset::new(names.into_iter().zip(columns)).map_err(InputError::Dataset)
}

/// Parses a CSV file.
///
/// Every row must have as many cells as the header. Blank cells are skipped,
/// so a group may end up with fewer samples than there are rows.
pub(crate) fn parse_csv(text: &str) -> Result<Dataset, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.trim().as_bytes());
    let records = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(InputError::Csv)?;

    let Some((header, rows)) = records.split_first() else {
        return Err(InputError::MissingRows);
    };
    if rows.is_empty() {
        return Err(InputError::MissingRows);
    }

    let expected = header.len();
    let mut columns = vec![vec![]; expected];
    for (i, record) in rows.iter().enumerate() {
        let row = i + 2;
        if record.len() != expected {
            return Err(InputError::ColumnCount {
                row,
                found: record.len(),
                expected,
            });
        }
        for (j, cell) in record.iter().enumerate() {
            let cell = clean_cell(cell);
            if cell.is_empty() {
                continue;
            }
            let number = parse_number(&cell).ok_or_else(|| InputError::InvalidNumber {
                row,
                column: j + 1,
                value: cell.clone(),
            })?;
            columns[j].push(number);
        }
    }

    let names = header.iter().map(clean_cell).collect::<Vec<_>>();
    Dataset::new(names.into_iter().zip(columns)).map_err(InputError::Dataset)
}

/// Trims a cell, drops surrounding quotes and strips thousands separators
/// from cells made only of digits and commas.
fn clean_cell(cell: &str) -> String {
    let cell = cell.trim().trim_matches('"').trim();
    if !cell.is_empty() && cell.chars().all(|c| c.is_ascii_digit() || c == ',') {
        cell.replace(',', "")
    } else {
        cell.to_owned()
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
