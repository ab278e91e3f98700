//! `report` command

mod handler;

use std::path::PathBuf;

use clap::Args;

pub use handler::handle_report_command;

#[derive(Args, Debug)]
pub struct ReportCommands {
    /// Route status export (.csv, .xlsx, .xls or .ods)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Worksheet to read from a spreadsheet input (defaults to the first sheet)
    #[arg(short, long)]
    pub sheet: Option<String>,

    /// Output file (defaults to <output dir>/<prefix>_<YYYYMMDD_HHMM>.xlsx)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output directory, overrides config and environment
    #[arg(short = 'd', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Run as if the Eastern time were this ("YYYY-MM-DD HH:MM[:SS]")
    #[arg(long, value_name = "DATETIME")]
    pub now: Option<String>,

    /// Do not print the run summary
    #[arg(short, long)]
    pub quiet: bool,
}
