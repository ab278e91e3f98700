//! Meta sheet - run timestamp and the fixed business rules, for human audit

use anyhow::Result;
use rust_xlsxwriter::Workbook;

use super::super::table::{CellValue, ColumnWidths, SheetTable, write_table};
use crate::monitor::aggregate::{RED_MINUTES, YELLOW_MINUTES};
use crate::monitor::clock::REPORT_TZ;
use crate::monitor::compose::{SLOW_DELIVERIES_PER_HOUR, STALLED_MINUTES};
use crate::monitor::types::{GateKind, Report};

/// Item/value rows describing the run and the rules applied
pub fn meta_rows(report: &Report) -> Vec<(&'static str, String)> {
    vec![
        ("RunTime(ET)", report.now.format("%Y-%m-%d %H:%M:%S").to_string()),
        ("TimeZone", REPORT_TZ.name().to_string()),
        (
            "SourceFile",
            report.source_name.clone().unwrap_or_else(|| "-".to_string()),
        ),
        (
            "InputColumns",
            "Route = column B, Status = column J, StatusTime = column L; \
             fleet/driver detected by header containing FLEE / DRIVER"
                .to_string(),
        ),
        ("Color: purple", "StatusFlag = NO_DELIVERED".to_string()),
        ("Color: red", format!("MinutesSinceLast > {}", RED_MINUTES)),
        (
            "Color: yellow",
            format!("{} < MinutesSinceLast <= {}", YELLOW_MINUTES, RED_MINUTES),
        ),
        ("Exception rule A", "StatusFlag = NO_DELIVERED".to_string()),
        (
            "Exception rule B",
            format!("MinutesSinceLast > {} AND Remaining > 0", STALLED_MINUTES),
        ),
        (
            "Exception rule C",
            format!(
                "DeliveriesPerHour < {} AND Remaining > 0",
                SLOW_DELIVERIES_PER_HOUR
            ),
        ),
        ("3pm check", GateKind::ThreePm.rule_text()),
        ("6pm check", GateKind::SixPm.rule_text()),
    ]
}

/// Create the static documentation sheet
pub fn create_meta_sheet(workbook: &mut Workbook, report: &Report) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name("Meta")?;

    let mut table = SheetTable::new(vec!["Item", "Value"]);
    for (item, value) in meta_rows(report) {
        table.push(vec![CellValue::text(item), CellValue::text(value)], None);
    }

    let mut widths = ColumnWidths::default();
    write_table(sheet, &mut widths, 0, &table)?;
    widths.apply(sheet)?;
    Ok(())
}
