//! Report command handler

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::*;

use super::ReportCommands;
use crate::config::Config;
use crate::monitor::clock::{capture_now, parse_now_override};
use crate::monitor::types::{AlertBucket, GateCheck, Report};
use crate::monitor::{build_report_from_file, excel, report_file_name};

/// Handle `route-monitor report`
pub fn handle_report_command(args: ReportCommands, config: &Config) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    // Captured once; every time-relative value in the report derives from it
    let now = match args.now.as_deref() {
        Some(s) => parse_now_override(s)?,
        None => capture_now(),
    };
    log::info!("Run time (ET): {}", now.format("%Y-%m-%d %H:%M:%S"));

    let sheet = args.sheet.as_deref().or(config.input_sheet.as_deref());
    let report = build_report_from_file(&args.input, sheet, now)
        .with_context(|| format!("Failed to build report from {}", args.input.display()))?;

    let output = match args.output {
        Some(path) => path,
        None => {
            let dir = args.output_dir.unwrap_or_else(|| config.output_dir.clone());
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(report_file_name(&config.file_prefix, &now))
        }
    };

    excel::write_report(&report, &output)?;

    if !args.quiet {
        print_summary(&report, &output);
    }
    Ok(())
}

fn print_summary(report: &Report, output: &Path) {
    println!(
        "{} {}",
        "Report written:".bright_green().bold(),
        output.display().to_string().cyan()
    );
    println!("  Run time (ET):  {}", report.now.format("%Y-%m-%d %H:%M"));
    println!("  Routes:         {}", report.routes.len());
    println!("  Carriers:       {}", report.carriers.len());
    println!(
        "  No delivered:   {}",
        report.count_bucket(AlertBucket::NoDelivered).to_string().magenta()
    );
    println!(
        "  Red (>60 min):  {}",
        report.count_bucket(AlertBucket::Red).to_string().red()
    );
    println!(
        "  Yellow (>30):   {}",
        report.count_bucket(AlertBucket::Yellow).to_string().yellow()
    );
    println!("  Exceptions:     {}", report.exceptions.len().to_string().bold());
    println!("  {}", gate_line(&report.three_pm));
    println!("  {}", gate_line(&report.six_pm));
}

fn gate_line(check: &GateCheck) -> String {
    let label = format!("{}:", check.kind.sheet_name());
    if check.applied {
        format!("{:<15} {} ({} routes)", label, "YES".green(), check.routes.len())
    } else {
        format!("{:<15} {}", label, "NO".dimmed())
    }
}
