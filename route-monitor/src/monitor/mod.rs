//! Route monitor report pipeline
//!
//! read → normalize → aggregate → compose → render. Each stage takes plain
//! data and the single captured run time; nothing is shared between runs.

pub mod aggregate;
pub mod clock;
pub mod compose;
pub mod excel;
pub mod input;
pub mod types;

use std::path::Path;

use anyhow::Result;
use chrono::DateTime;
use chrono_tz::Tz;

use types::Report;

/// Read and normalize `input`, then compose the report for `now`
pub fn build_report_from_file(input: &Path, sheet: Option<&str>, now: DateTime<Tz>) -> Result<Report> {
    let table = input::read_table(input, sheet)?;
    let rows = input::normalize(&table)?;
    let source_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());

    Ok(compose::build_report(&rows, now, source_name))
}

/// Default report file name for a run, e.g. `RouteMonitor_20240501_1501.xlsx`
pub fn report_file_name(prefix: &str, now: &DateTime<Tz>) -> String {
    format!("{}_{}.xlsx", prefix, now.format("%Y%m%d_%H%M"))
}
