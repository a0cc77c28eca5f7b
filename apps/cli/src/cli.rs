//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use deligo_onboarding::RuleMode;

use crate::config::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "deligo")]
#[command(version, about = "Validate DeliGo delivery-partner onboarding submissions")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to ./deligo.toml when present)
    #[arg(long, short, global = true, env = "DELIGO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter directives, e.g. `debug` or `deligo_onboarding=trace`
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate submission JSON files
    Validate(ValidateArgs),

    /// Print the effective configuration as TOML
    Config,
}

#[derive(Debug, clap::Args)]
pub struct ValidateArgs {
    /// Submission files; `-` reads standard input
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// How cross-field rules treat fields that already failed: staged, report-all
    #[arg(long, short)]
    pub mode: Option<RuleMode>,

    /// Output format
    #[arg(long, short, value_enum)]
    pub output: Option<OutputFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_validate() {
        let cli = Cli::parse_from(["deligo", "validate", "a.json", "-", "--mode", "report-all"]);
        let Command::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.files, vec![PathBuf::from("a.json"), PathBuf::from("-")]);
        assert_eq!(args.mode, Some(RuleMode::ReportAll));
        assert_eq!(args.output, None);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let result = Cli::try_parse_from(["deligo", "validate", "a.json", "--mode", "lenient"]);
        assert!(result.is_err());
    }
}
