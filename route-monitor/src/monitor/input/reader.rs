//! Read the raw route export (CSV or spreadsheet) into a text table

use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto};

use crate::monitor::types::RawTable;

/// Supported input file kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Csv,
    Spreadsheet,
}

impl InputKind {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(InputKind::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(InputKind::Spreadsheet),
            other => bail!(
                "Unsupported input file type '{}' for {} (expected .csv, .xlsx, .xls or .ods)",
                other,
                path.display()
            ),
        }
    }
}

/// Read an input file into a [`RawTable`]
///
/// `sheet` selects a worksheet by name for spreadsheet inputs; the first
/// sheet is used otherwise. Ignored for CSV.
pub fn read_table<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> Result<RawTable> {
    let path = path.as_ref();
    let table = match InputKind::from_path(path)? {
        InputKind::Csv => read_csv(path)?,
        InputKind::Spreadsheet => read_spreadsheet(path, sheet)?,
    };

    log::info!(
        "Read {} data rows ({} columns) from {}",
        table.rows.len(),
        table.headers.len(),
        path.display()
    );
    Ok(table)
}

fn read_csv(path: &Path) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let headers = rdr
        .headers()
        .with_context(|| format!("Failed to read CSV header: {}", path.display()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record
            .with_context(|| format!("Failed to read CSV row {} of {}", idx + 2, path.display()))?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    Ok(RawTable { headers, rows })
}

fn read_spreadsheet(path: &Path, sheet: Option<&str>) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open spreadsheet: {}", path.display()))?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .context("Spreadsheet has no sheets")?
            .clone(),
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header) => header.iter().map(|c| cell_to_text(c).trim().to_string()).collect(),
        None => return Ok(RawTable::default()),
    };
    let rows = rows
        .map(|row| row.iter().map(cell_to_text).collect())
        .collect();

    Ok(RawTable { headers, rows })
}

/// Render a spreadsheet cell as the text the normalizer expects
pub(crate) fn cell_to_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}
