use std::io::{self, Write};

use stratlab_stats::dataset::{Dataset, Group};

use crate::{input::InputArg, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ValidateArg {
    #[clap(flatten)]
    input: InputArg,
}

pub(crate) fn run(arg: &ValidateArg) -> anyhow::Result<()> {
    let dataset = arg.input.read_dataset()?;
    let mut output = Output::from_output_path(None)?;
    output.write_with(|out| write_groups(out, &arg.input.display_name(), &dataset))
}

fn write_groups<W>(out: &mut W, source: &str, dataset: &Dataset) -> io::Result<()>
where
    W: Write,
{
    writeln!(
        out,
        "{source}: {} groups, {} samples",
        dataset.len(),
        dataset.total_samples()
    )?;
    let width = dataset.names().map(str::len).max().unwrap_or(0).max(5);
    writeln!(out, "  {:<width$} {:>8}", "Group", "Samples")?;
    writeln!(out, "  {}", "-".repeat(width + 9))?;
    for group in dataset.groups() {
        writeln!(out, "  {:<width$} {:>8}", group.name(), group.len())?;
    }

    let first_len = dataset.groups().first().map_or(0, Group::len);
    if dataset.groups().iter().any(|g| g.len() != first_len) {
        writeln!(
            out,
            "\nNote: groups differ in length, the correlation matrix will be unavailable"
        )?;
    }
    if dataset.len() < 2 {
        writeln!(out, "\nNote: ANOVA needs at least 2 groups")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_groups() {
        let dataset = Dataset::new([("a", vec![1.0, 2.0]), ("longer name", vec![3.0])]).unwrap();
        let mut buf = vec![];
        write_groups(&mut buf, "scores.tsv", &dataset).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("scores.tsv: 2 groups, 3 samples\n"));
        assert!(text.contains("  longer name        1\n"));
        assert!(text.contains("groups differ in length"));
        assert!(!text.contains("ANOVA"));
    }
}
