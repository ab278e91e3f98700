//! RouteMonitor and Exceptions sheets - one row per route, colored by alert state

use anyhow::Result;
use rust_xlsxwriter::Workbook;

use super::super::formatting::{NO_DELIVERED_FILL, RED_FILL, YELLOW_FILL};
use super::super::table::{CellValue, ColumnWidths, SheetTable, write_table};
use crate::monitor::aggregate::{RED_MINUTES, YELLOW_MINUTES};
use crate::monitor::types::{RouteMetrics, StatusFlag};

pub const ROUTE_COLUMNS: [&str; 15] = [
    "Route",
    "DriverName",
    "FleeName",
    "Total",
    "Success(Delivered)",
    "Failed(*FAIL*)",
    "Remaining",
    "CompletionRate",
    "1stDeliveryTime",
    "HoursSinceFirstDelivery",
    "DeliveriesPerHour",
    "LatestDeliveredTime",
    "MinutesSinceLast",
    "StatusFlag",
    "AlertBucket",
];

/// Cells for one route, in [`ROUTE_COLUMNS`] order
pub fn route_cells(route: &RouteMetrics) -> Vec<CellValue> {
    vec![
        CellValue::text(route.route.as_str()),
        CellValue::opt_text(route.driver_name.as_deref()),
        CellValue::opt_text(route.fleet_name.as_deref()),
        CellValue::Integer(route.total),
        CellValue::Integer(route.delivered),
        CellValue::Integer(route.failed),
        CellValue::Integer(route.remaining),
        CellValue::Percent(route.completion_rate),
        CellValue::opt_datetime(route.first_delivered_at),
        CellValue::rounded(route.hours_since_first, 2),
        CellValue::rounded(route.deliveries_per_hour, 2),
        CellValue::opt_datetime(route.last_delivered_at),
        CellValue::rounded(route.minutes_since_last, 1),
        CellValue::text(route.status_flag.as_str()),
        CellValue::text(route.alert_bucket.as_str()),
    ]
}

/// Row fill for a route: purple, red, yellow or none
pub fn route_fill(route: &RouteMetrics) -> Option<u32> {
    if route.status_flag == StatusFlag::NoDelivered {
        return Some(NO_DELIVERED_FILL);
    }
    match route.minutes_since_last {
        Some(m) if m > RED_MINUTES => Some(RED_FILL),
        Some(m) if m > YELLOW_MINUTES => Some(YELLOW_FILL),
        _ => None,
    }
}

/// Route table with alert coloring
pub fn route_table(routes: &[RouteMetrics]) -> SheetTable {
    let mut table = SheetTable::new(ROUTE_COLUMNS.to_vec());
    for route in routes {
        table.push(route_cells(route), route_fill(route));
    }
    table
}

/// Route table where every row shares one fill
pub fn flat_route_table(routes: &[RouteMetrics], fill: u32) -> SheetTable {
    let mut table = SheetTable::new(ROUTE_COLUMNS.to_vec());
    for route in routes {
        table.push(route_cells(route), Some(fill));
    }
    table
}

fn create_route_sheet(workbook: &mut Workbook, name: &str, routes: &[RouteMetrics]) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(name)?;

    let mut widths = ColumnWidths::default();
    write_table(sheet, &mut widths, 0, &route_table(routes))?;
    widths.apply(sheet)?;
    Ok(())
}

/// Create the full sorted route sheet
pub fn create_route_monitor_sheet(workbook: &mut Workbook, routes: &[RouteMetrics]) -> Result<()> {
    create_route_sheet(workbook, "RouteMonitor", routes)
}

/// Create the exception subset sheet
pub fn create_exceptions_sheet(workbook: &mut Workbook, exceptions: &[RouteMetrics]) -> Result<()> {
    create_route_sheet(workbook, "Exceptions", exceptions)
}
