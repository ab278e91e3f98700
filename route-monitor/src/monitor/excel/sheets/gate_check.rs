//! 3pm / 6pm check sheets - metadata block followed by the flagged routes

use anyhow::Result;
use chrono::DateTime;
use chrono_tz::Tz;
use rust_xlsxwriter::Workbook;

use super::super::formatting::{SIX_PM_FILL, THREE_PM_FILL, create_label_format};
use super::super::table::{CellValue, ColumnWidths, write_pair, write_table};
use super::routes::flat_route_table;
use crate::monitor::types::{GateCheck, GateKind};

/// Row of the route table header, below the metadata block and a blank row
pub const GATE_TABLE_HEADER_ROW: u32 = 5;

fn gate_fill(kind: GateKind) -> u32 {
    match kind {
        GateKind::ThreePm => THREE_PM_FILL,
        GateKind::SixPm => SIX_PM_FILL,
    }
}

/// Create a time-gate sheet
pub fn create_gate_sheet(workbook: &mut Workbook, check: &GateCheck, now: &DateTime<Tz>) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(check.kind.sheet_name())?;

    let label = create_label_format();
    let mut widths = ColumnWidths::default();

    let meta = [
        ("RunTime(ET)", CellValue::text(now.format("%Y-%m-%d %H:%M:%S").to_string())),
        ("Rule", CellValue::text(check.kind.rule_text())),
        ("Applied", CellValue::text(if check.applied { "YES" } else { "NO" })),
        ("MatchedRoutes", CellValue::Integer(check.routes.len() as i64)),
    ];
    for (row, (key, value)) in meta.iter().enumerate() {
        write_pair(sheet, &mut widths, row as u32, key, value, &label)?;
    }

    let table = flat_route_table(&check.routes, gate_fill(check.kind));
    write_table(sheet, &mut widths, GATE_TABLE_HEADER_ROW, &table)?;
    widths.apply(sheet)?;
    Ok(())
}
