//! Summary sheet - one row per carrier

use anyhow::Result;
use rust_xlsxwriter::Workbook;

use super::super::table::{CellValue, ColumnWidths, SheetTable, write_table};
use crate::monitor::types::CarrierSummary;

pub const SUMMARY_COLUMNS: [&str; 11] = [
    "FleeName",
    "Routes",
    "Total",
    "Delivered",
    "Failed",
    "Remaining",
    "NoDeliveredRoutes",
    "RedRoutes",
    "YellowRoutes",
    "AvgDeliveriesPerHour",
    "CompletionRate",
];

fn carrier_cells(carrier: &CarrierSummary) -> Vec<CellValue> {
    vec![
        CellValue::text(carrier.fleet_name.as_str()),
        CellValue::Integer(carrier.routes as i64),
        CellValue::Integer(carrier.total),
        CellValue::Integer(carrier.delivered),
        CellValue::Integer(carrier.failed),
        CellValue::Integer(carrier.remaining),
        CellValue::Integer(carrier.no_delivered_routes as i64),
        CellValue::Integer(carrier.red_routes as i64),
        CellValue::Integer(carrier.yellow_routes as i64),
        CellValue::rounded(carrier.avg_deliveries_per_hour, 2),
        CellValue::Percent(carrier.completion_rate),
    ]
}

/// Create the carrier summary sheet
pub fn create_summary_sheet(workbook: &mut Workbook, carriers: &[CarrierSummary]) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name("Summary")?;

    let mut table = SheetTable::new(SUMMARY_COLUMNS.to_vec());
    for carrier in carriers {
        table.push(carrier_cells(carrier), None);
    }

    let mut widths = ColumnWidths::default();
    write_table(sheet, &mut widths, 0, &table)?;
    widths.apply(sheet)?;
    Ok(())
}
