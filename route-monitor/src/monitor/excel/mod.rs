//! Excel rendering of the route monitor report

mod formatting;
mod table;
pub mod sheets;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use super::types::Report;
use sheets::*;

/// Render the report into an in-memory xlsx document
pub fn render_report(report: &Report) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    create_route_monitor_sheet(&mut workbook, &report.routes)?;
    create_summary_sheet(&mut workbook, &report.carriers)?;
    create_exceptions_sheet(&mut workbook, &report.exceptions)?;
    create_gate_sheet(&mut workbook, &report.three_pm, &report.now)?;
    create_gate_sheet(&mut workbook, &report.six_pm, &report.now)?;
    create_meta_sheet(&mut workbook, report)?;

    let buffer = workbook
        .save_to_buffer()
        .context("Failed to render Excel workbook")?;

    log::debug!("Rendered workbook ({} bytes)", buffer.len());
    Ok(buffer)
}

/// Render the report and write it to `path`
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    let buffer = render_report(report)?;
    fs::write(path, buffer)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

    log::info!("Route monitor report exported to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    use calamine::{Data, Reader, Xlsx};
    use chrono::{Duration, NaiveDateTime};

    use crate::monitor::clock::parse_now_override;
    use crate::monitor::compose::build_report;
    use crate::monitor::types::RawRow;

    const SHEET_NAMES: [&str; 6] = [
        "RouteMonitor",
        "Summary",
        "Exceptions",
        "3pm check",
        "6pm check",
        "Meta",
    ];

    fn make_rows(now: NaiveDateTime) -> Vec<RawRow> {
        let row = |route: &str, status: &str, minutes_ago: Option<i64>, fleet: Option<&str>| RawRow {
            route: Some(route.to_string()),
            status: status.to_string(),
            status_time: minutes_ago.map(|m| now - Duration::minutes(m)),
            fleet_name: fleet.map(str::to_string),
            driver_name: None,
        };

        vec![
            row("R1", "DELIVERED", Some(120), Some("Acme")),
            row("R1", "DELIVERED", Some(10), Some("Acme")),
            row("R1", "PENDING", None, Some("Acme")),
            row("R2", "PENDING", None, None),
            row("R2", "PENDING", None, None),
            row("R3", "DELIVERED", Some(75), Some("Acme")),
            row("R3", "PENDING", None, Some("Acme")),
        ]
    }

    fn open(buffer: Vec<u8>) -> Xlsx<Cursor<Vec<u8>>> {
        Xlsx::new(Cursor::new(buffer)).unwrap()
    }

    fn cell_string(cell: Option<&Data>) -> String {
        match cell {
            Some(Data::String(s)) => s.clone(),
            Some(Data::Float(f)) => f.to_string(),
            Some(other) => format!("{:?}", other),
            None => String::new(),
        }
    }

    #[test]
    fn test_render_six_sheets_in_order() {
        let now = parse_now_override("2024-05-01 14:59").unwrap();
        let report = build_report(&make_rows(now.naive_local()), now, None);
        let workbook = open(render_report(&report).unwrap());

        assert_eq!(workbook.sheet_names(), SHEET_NAMES.to_vec());
    }

    #[test]
    fn test_route_monitor_sheet_contents() {
        let now = parse_now_override("2024-05-01 14:59").unwrap();
        let report = build_report(&make_rows(now.naive_local()), now, None);
        let mut workbook = open(render_report(&report).unwrap());

        let range = workbook.worksheet_range("RouteMonitor").unwrap();
        let rows: Vec<_> = range.rows().collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(cell_string(rows[0].first()), "Route");
        assert_eq!(cell_string(rows[0].get(14)), "AlertBucket");

        // NO_DELIVERED first, then R3 (75 min) before R1 (10 min)
        assert_eq!(cell_string(rows[1].first()), "R2");
        assert_eq!(cell_string(rows[2].first()), "R3");
        assert_eq!(cell_string(rows[3].first()), "R1");
        assert_eq!(cell_string(rows[2].get(14)), "RED");
        assert_eq!(rows[3].get(3), Some(&Data::Float(3.0)));
    }

    #[test]
    fn test_datetime_cells_are_excel_dates() {
        let now = parse_now_override("2024-05-01 14:59").unwrap();
        let report = build_report(&make_rows(now.naive_local()), now, None);
        let mut workbook = open(render_report(&report).unwrap());

        let range = workbook.worksheet_range("RouteMonitor").unwrap();
        let last = now.naive_local() - Duration::minutes(10);
        match range.get_value((3, 11)) {
            Some(Data::DateTime(dt)) => assert_eq!(dt.as_datetime(), Some(last)),
            other => panic!("unexpected cell {:?}", other),
        }
    }

    /// Raw worksheet XML for the sheet at `index` (1-based)
    fn sheet_xml(buffer: &[u8], index: usize) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(buffer)).unwrap();
        let mut file = archive
            .by_name(&format!("xl/worksheets/sheet{}.xml", index))
            .unwrap();
        let mut xml = String::new();
        file.read_to_string(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_every_sheet_freezes_first_row() {
        let now = parse_now_override("2024-05-01 15:01").unwrap();
        let report = build_report(&make_rows(now.naive_local()), now, None);
        let buffer = render_report(&report).unwrap();

        for index in 1..=SHEET_NAMES.len() {
            let xml = sheet_xml(&buffer, index);
            assert!(
                xml.contains(r#"<pane ySplit="1" topLeftCell="A2""#),
                "sheet {} does not freeze its first row",
                SHEET_NAMES[index - 1]
            );
        }

        // Gate filter still covers the route table below the metadata block
        assert!(sheet_xml(&buffer, 4).contains(r#"<autoFilter ref="A6:O7"/>"#));
    }

    #[test]
    fn test_gate_sheets_record_application() {
        let before = parse_now_override("2024-05-01 14:59").unwrap();
        let report = build_report(&make_rows(before.naive_local()), before, None);
        let mut workbook = open(render_report(&report).unwrap());
        let range = workbook.worksheet_range("3pm check").unwrap();
        assert_eq!(cell_string(range.get_value((2, 0))), "Applied");
        assert_eq!(cell_string(range.get_value((2, 1))), "NO");
        assert_eq!(cell_string(range.get_value((5, 0))), "Route");
        assert_eq!(range.get_value((6, 0)), None);

        let after = parse_now_override("2024-05-01 15:01").unwrap();
        let report = build_report(&make_rows(after.naive_local()), after, None);
        let mut workbook = open(render_report(&report).unwrap());
        let range = workbook.worksheet_range("3pm check").unwrap();
        assert_eq!(cell_string(range.get_value((2, 1))), "YES");
        // R2 (0%) and R3 (50% is not below 50%) -> only R2
        assert_eq!(cell_string(range.get_value((6, 0))), "R2");
        assert_eq!(range.get_value((7, 0)), None);

        let six = workbook.worksheet_range("6pm check").unwrap();
        assert_eq!(cell_string(six.get_value((2, 1))), "NO");
    }

    #[test]
    fn test_summary_and_exceptions_sheets() {
        let now = parse_now_override("2024-05-01 14:59").unwrap();
        let report = build_report(&make_rows(now.naive_local()), now, None);
        let mut workbook = open(render_report(&report).unwrap());

        let summary = workbook.worksheet_range("Summary").unwrap();
        assert_eq!(cell_string(summary.get_value((1, 0))), "Acme");
        assert_eq!(cell_string(summary.get_value((2, 0))), "UNKNOWN");

        // R2 (no deliveries), R3 (1 per 75 min, remaining 1), R1 (2 per 2h, remaining 1)
        let exceptions = workbook.worksheet_range("Exceptions").unwrap();
        let routes: Vec<String> = exceptions
            .rows()
            .skip(1)
            .map(|r| cell_string(r.first()))
            .collect();
        assert_eq!(routes, vec!["R2", "R3", "R1"]);
    }
}
