use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use self::{analyze::AnalyzeArg, validate::ValidateArg};

mod analyze;
mod validate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// What to do with the input table
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Compute summary statistics, ANOVA, box plots, histogram and correlations
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// Parse the input table and list its groups
    Validate(#[clap(flatten)] ValidateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(args.verbose);
    match &args.mode {
        Mode::Analyze(arg) => analyze::run(arg)?,
        Mode::Validate(arg) => validate::run(arg)?,
    }
    Ok(())
}

/// Logs go to stderr so that reports on stdout stay machine-readable.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_verbose_is_global() {
        let args = CommandArgs::try_parse_from(["stratlab", "analyze", "-vv", "scores.tsv"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.mode, Mode::Analyze(_)));
    }
}
