//! Command-line interface

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::report::ReportCommands;

#[derive(Parser)]
#[command(name = "route-monitor")]
#[command(about = "Turn a daily delivery-route status export into a route monitor workbook", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to <config dir>/route-monitor/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the route monitor report from an export file
    Report(ReportCommands),
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
    fn test_parse_report_args() {
        let cli = Cli::try_parse_from([
            "route-monitor",
            "report",
            "export.xlsx",
            "--now",
            "2024-05-01 15:01",
            "--output",
            "out.xlsx",
        ])
        .unwrap();

        let Commands::Report(args) = cli.command;
        assert_eq!(args.input, PathBuf::from("export.xlsx"));
        assert_eq!(args.now.as_deref(), Some("2024-05-01 15:01"));
        assert_eq!(args.output, Some(PathBuf::from("out.xlsx")));
        assert!(!args.quiet);
    }
}
