//! Generic styled table writer shared by all report sheets

use anyhow::Result;
use chrono::NaiveDateTime;
use rust_xlsxwriter::{Format, Worksheet};

use super::formatting::{
    MAX_COLUMN_WIDTH, MIN_COLUMN_WIDTH, RowFormats, WIDTH_SAMPLE_ROWS, create_header_format,
};

/// A typed cell value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Integer(i64),
    Number(f64),
    Percent(f64),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn opt_text(s: Option<&str>) -> Self {
        s.map_or(CellValue::Empty, CellValue::text)
    }

    /// Number rounded to `places` decimals, empty when absent
    pub fn rounded(value: Option<f64>, places: i32) -> Self {
        let factor = 10f64.powi(places);
        value.map_or(CellValue::Empty, |v| CellValue::Number((v * factor).round() / factor))
    }

    pub fn opt_datetime(value: Option<NaiveDateTime>) -> Self {
        value.map_or(CellValue::Empty, CellValue::DateTime)
    }

    /// Length of the value as displayed, used for column sizing
    pub fn display_len(&self) -> usize {
        match self {
            CellValue::Empty => 0,
            CellValue::Text(s) => s.chars().count(),
            CellValue::Integer(i) => i.to_string().len(),
            CellValue::Number(f) | CellValue::Percent(f) => f.to_string().len(),
            CellValue::DateTime(_) => "yyyy-mm-dd hh:mm:ss".len(),
        }
    }

    pub fn write(&self, sheet: &mut Worksheet, row: u32, col: u16, formats: &RowFormats) -> Result<()> {
        match self {
            CellValue::Empty => {
                sheet.write_blank(row, col, &formats.plain)?;
            }
            CellValue::Text(s) => {
                sheet.write_string_with_format(row, col, s, &formats.plain)?;
            }
            CellValue::Integer(i) => {
                sheet.write_number_with_format(row, col, *i as f64, &formats.plain)?;
            }
            CellValue::Number(f) => {
                sheet.write_number_with_format(row, col, *f, &formats.plain)?;
            }
            CellValue::Percent(f) => {
                sheet.write_number_with_format(row, col, *f, &formats.percent)?;
            }
            CellValue::DateTime(dt) => {
                sheet.write_datetime_with_format(row, col, dt, &formats.datetime)?;
            }
        }
        Ok(())
    }
}

/// Header plus rows, each row with an optional background fill
#[derive(Debug, Clone, Default)]
pub struct SheetTable {
    pub headers: Vec<&'static str>,
    pub rows: Vec<(Vec<CellValue>, Option<u32>)>,
}

impl SheetTable {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, cells: Vec<CellValue>, fill: Option<u32>) {
        self.rows.push((cells, fill));
    }
}

/// Tracks the widest value per column over the sampled rows
#[derive(Debug, Default)]
pub struct ColumnWidths {
    widths: Vec<usize>,
}

impl ColumnWidths {
    pub fn observe(&mut self, row: u32, col: u16, len: usize) {
        if row >= WIDTH_SAMPLE_ROWS {
            return;
        }
        let col = col as usize;
        if self.widths.len() <= col {
            self.widths.resize(col + 1, MIN_COLUMN_WIDTH);
        }
        self.widths[col] = self.widths[col].max(len);
    }

    /// Width for a column: longest sampled value plus padding, capped
    pub fn width(&self, col: u16) -> usize {
        let longest = self.widths.get(col as usize).copied().unwrap_or(MIN_COLUMN_WIDTH);
        (longest + 2).min(MAX_COLUMN_WIDTH)
    }

    pub fn apply(&self, sheet: &mut Worksheet) -> Result<()> {
        for col in 0..self.widths.len() as u16 {
            sheet.set_column_width(col, self.width(col) as f64)?;
        }
        Ok(())
    }
}

/// Write a key/value row (bold key)
pub fn write_pair(
    sheet: &mut Worksheet,
    widths: &mut ColumnWidths,
    row: u32,
    key: &str,
    value: &CellValue,
    label_format: &Format,
) -> Result<()> {
    sheet.write_string_with_format(row, 0, key, label_format)?;
    widths.observe(row, 0, key.chars().count());
    value.write(sheet, row, 1, &RowFormats::new(None))?;
    widths.observe(row, 1, value.display_len());
    Ok(())
}

/// Write `table` with its header at `header_row`.
///
/// Styles the header, freezes the sheet's first row and puts an autofilter
/// over header and data. Returns the row after the table.
pub fn write_table(
    sheet: &mut Worksheet,
    widths: &mut ColumnWidths,
    header_row: u32,
    table: &SheetTable,
) -> Result<u32> {
    let header_format = create_header_format();
    for (col, header) in table.headers.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(header_row, col, *header, &header_format)?;
        widths.observe(header_row, col, header.chars().count());
    }

    let plain = RowFormats::new(None);
    let mut row = header_row + 1;
    for (cells, fill) in &table.rows {
        let filled;
        let formats = match fill {
            Some(rgb) => {
                filled = RowFormats::new(Some(*rgb));
                &filled
            }
            None => &plain,
        };

        for (col, value) in cells.iter().enumerate() {
            let col = col as u16;
            value.write(sheet, row, col, formats)?;
            widths.observe(row, col, value.display_len());
        }
        row += 1;
    }

    let last_col = table.headers.len().saturating_sub(1) as u16;
    sheet.set_freeze_panes(1, 0)?;
    sheet.autofilter(header_row, 0, row - 1, last_col)?;

    Ok(row)
}
