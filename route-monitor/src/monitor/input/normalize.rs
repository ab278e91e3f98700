//! Row normalization: fixed-position columns plus header-detected optionals
//!
//! Route, status and status time are read strictly by position (B, J, L in
//! spreadsheet terms). Fleet and driver columns are found by header substring.

use anyhow::{Result, bail};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::monitor::clock::REPORT_TZ;
use crate::monitor::types::{RawRow, RawTable};

/// Column B
pub const ROUTE_COL: usize = 1;
/// Column J
pub const STATUS_COL: usize = 9;
/// Column L
pub const STATUS_TIME_COL: usize = 11;

/// Header substring identifying the fleet/carrier column
pub const FLEET_KEY: &str = "FLEE";
/// Header substring identifying the driver column
pub const DRIVER_KEY: &str = "DRIVER";

/// Find the first header containing `key`, case-insensitively
pub fn detect_column(headers: &[String], key: &str) -> Option<usize> {
    let key = key.to_uppercase();
    headers
        .iter()
        .position(|h| h.to_uppercase().contains(&key))
}

/// Normalize every data row of `table`
pub fn normalize(table: &RawTable) -> Result<Vec<RawRow>> {
    if table.headers.len() <= STATUS_TIME_COL {
        bail!(
            "Input has {} columns; expected route in column B, status in column J and status time in column L",
            table.headers.len()
        );
    }

    let fleet_col = detect_column(&table.headers, FLEET_KEY);
    let driver_col = detect_column(&table.headers, DRIVER_KEY);
    log::debug!(
        "Optional columns: fleet={:?} driver={:?}",
        fleet_col.map(|c| &table.headers[c]),
        driver_col.map(|c| &table.headers[c])
    );

    let mut bad_times = 0usize;
    let rows: Vec<RawRow> = table
        .rows
        .iter()
        .map(|row| {
            let raw_time = cell(row, STATUS_TIME_COL);
            let status_time = raw_time.and_then(parse_timestamp);
            if raw_time.is_some_and(|t| !t.trim().is_empty()) && status_time.is_none() {
                bad_times += 1;
                log::debug!("Unparseable status time: {:?}", raw_time);
            }

            RawRow {
                route: cell(row, ROUTE_COL).map(str::to_string),
                status: cell(row, STATUS_COL).unwrap_or_default().to_uppercase(),
                status_time,
                fleet_name: fleet_col.and_then(|c| cell(row, c)).map(str::to_string),
                driver_name: driver_col.and_then(|c| cell(row, c)).map(str::to_string),
            }
        })
        .collect();

    if bad_times > 0 {
        log::warn!("{} status time values could not be parsed and were ignored", bad_times);
    }

    Ok(rows)
}

/// Cell text as exported, `None` when missing or empty.
///
/// Not trimmed: `"R1 "` is its own route and `" Delivered "` is not delivered.
fn cell(row: &[String], col: usize) -> Option<&str> {
    row.get(col).map(String::as_str).filter(|s| !s.is_empty())
}

/// Parse a status timestamp into an Eastern wall-clock value
///
/// Accepts the layouts route exports commonly use. Values carrying an
/// explicit offset are converted to Eastern; anything unrecognised is `None`.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&REPORT_TZ).naive_local());
    }

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S%.f",     // 2024-01-15T10:30:00.000
        "%Y-%m-%d %H:%M:%S%.f",     // 2024-01-15 10:30:00
        "%Y-%m-%d %H:%M",           // 2024-01-15 10:30
        "%Y/%m/%d %H:%M:%S",        // 2024/01/15 10:30:00
        "%m/%d/%Y %H:%M:%S",        // 01/15/2024 10:30:00
        "%m/%d/%Y %H:%M",           // 01/15/2024 10:30
        "%m/%d/%Y %I:%M:%S %p",     // 01/15/2024 10:30:00 AM
        "%m/%d/%Y %I:%M %p",        // 01/15/2024 10:30 AM
    ];
    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, format) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<String> {
        [
            "Tracking", "Route", "Stop", "Address", "City", "Zip", "Fleet Name", "Driver Name",
            "Weight", "Status", "Note", "Status Time",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn row(route: &str, status: &str, time: &str, fleet: &str, driver: &str) -> Vec<String> {
        let mut r = vec![String::new(); 12];
        r[1] = route.to_string();
        r[6] = fleet.to_string();
        r[7] = driver.to_string();
        r[9] = status.to_string();
        r[11] = time.to_string();
        r
    }

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_detect_column_case_insensitive_first_match() {
        let mut h = headers();
        h.push("Backup Driver".to_string());
        assert_eq!(detect_column(&h, "flee"), Some(6));
        assert_eq!(detect_column(&h, DRIVER_KEY), Some(7));
        assert_eq!(detect_column(&h, "CARRIER"), None);
    }

    #[test]
    fn test_normalize_reads_positional_columns() {
        let table = RawTable {
            headers: headers(),
            rows: vec![row("R1", "delivered", "2024-05-01 10:00:00", "Acme", "Ann")],
        };
        let rows = normalize(&table).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].route.as_deref(), Some("R1"));
        assert_eq!(rows[0].status, "DELIVERED");
        assert!(rows[0].is_delivered());
        assert_eq!(rows[0].status_time, Some(dt("2024-05-01 10:00:00")));
        assert_eq!(rows[0].fleet_name.as_deref(), Some("Acme"));
        assert_eq!(rows[0].driver_name.as_deref(), Some("Ann"));
    }

    #[test]
    fn test_normalize_missing_optional_columns() {
        let mut h = headers();
        h[6] = "Zone".to_string();
        h[7] = "Vehicle".to_string();
        let table = RawTable {
            headers: h,
            rows: vec![row("R1", "PENDING", "", "X", "Y")],
        };
        let rows = normalize(&table).unwrap();

        assert_eq!(rows[0].fleet_name, None);
        assert_eq!(rows[0].driver_name, None);
        assert_eq!(rows[0].status_time, None);
    }

    #[test]
    fn test_normalize_short_rows_and_blank_route() {
        let table = RawTable {
            headers: headers(),
            rows: vec![vec!["T1".to_string(), String::new()]],
        };
        let rows = normalize(&table).unwrap();

        assert_eq!(rows[0].route, None);
        assert_eq!(rows[0].status, "");
        assert_eq!(rows[0].status_time, None);
    }

    #[test]
    fn test_normalize_keeps_cell_text_verbatim() {
        let table = RawTable {
            headers: headers(),
            rows: vec![
                row("R1", " Delivered ", " 2024-05-01 10:00:00 ", "Acme ", ""),
                row("R1 ", "delivered", "2024-05-01 10:00:00", "Acme", ""),
            ],
        };
        let rows = normalize(&table).unwrap();

        assert_eq!(rows[0].status, " DELIVERED ");
        assert!(!rows[0].is_delivered());
        // Timestamps are still parsed leniently
        assert_eq!(rows[0].status_time, Some(dt("2024-05-01 10:00:00")));
        assert_eq!(rows[0].fleet_name.as_deref(), Some("Acme "));

        assert_eq!(rows[1].route.as_deref(), Some("R1 "));
        assert!(rows[1].is_delivered());
    }

    #[test]
    fn test_normalize_rejects_narrow_table() {
        let table = RawTable {
            headers: vec!["A".to_string(), "B".to_string()],
            rows: vec![],
        };
        assert!(normalize(&table).is_err());
    }

    #[test]
    fn test_bad_timestamp_becomes_absent() {
        let table = RawTable {
            headers: headers(),
            rows: vec![row("R1", "DELIVERED", "not a time", "", "")],
        };
        let rows = normalize(&table).unwrap();
        assert_eq!(rows[0].status_time, None);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Some(dt("2024-05-01 14:30:00"));
        assert_eq!(parse_timestamp("2024-05-01 14:30:00"), expected);
        assert_eq!(parse_timestamp("2024-05-01T14:30:00"), expected);
        assert_eq!(parse_timestamp("2024-05-01 14:30"), expected);
        assert_eq!(parse_timestamp("05/01/2024 14:30"), expected);
        assert_eq!(parse_timestamp("05/01/2024 2:30 PM"), expected);
        assert_eq!(parse_timestamp("2024-05-01"), Some(dt("2024-05-01 00:00:00")));
        assert_eq!(parse_timestamp("garbage"), None);
    }

    #[test]
    fn test_parse_timestamp_with_offset_converts_to_eastern() {
        // 18:30Z is 14:30 EDT
        assert_eq!(
            parse_timestamp("2024-05-01T18:30:00Z"),
            Some(dt("2024-05-01 14:30:00"))
        );
    }
}
