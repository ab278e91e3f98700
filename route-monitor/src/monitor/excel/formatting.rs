//! Excel formatting for the route monitor workbook

use rust_xlsxwriter::{Color, Format, FormatAlign};

/// Dark blue header background
pub const HEADER_FILL: u32 = 0x1F4E79;
/// Route with no timestamped delivery
pub const NO_DELIVERED_FILL: u32 = 0xE4DFEC;
/// Last delivery more than 60 minutes ago
pub const RED_FILL: u32 = 0xF8CBAD;
/// Last delivery more than 30 minutes ago
pub const YELLOW_FILL: u32 = 0xFFF2CC;
/// Rows flagged by the 3pm check
pub const THREE_PM_FILL: u32 = 0xFCE4D6;
/// Rows flagged by the 6pm check
pub const SIX_PM_FILL: u32 = 0xDDEBF7;

pub const PERCENT_NUM_FORMAT: &str = "0.00%";
pub const DATETIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Minimum column width before padding
pub const MIN_COLUMN_WIDTH: usize = 10;
/// Column width cap
pub const MAX_COLUMN_WIDTH: usize = 45;
/// Rows per column inspected when sizing
pub const WIDTH_SAMPLE_ROWS: u32 = 400;

/// Bold white-on-dark-blue, centered
pub fn create_header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

/// Bold label for key/value metadata rows
pub fn create_label_format() -> Format {
    Format::new().set_bold()
}

/// Formats for one data row, all sharing the same optional fill
#[derive(Clone)]
pub struct RowFormats {
    pub plain: Format,
    pub percent: Format,
    pub datetime: Format,
}

impl RowFormats {
    pub fn new(fill: Option<u32>) -> Self {
        let base = match fill {
            Some(rgb) => Format::new().set_background_color(Color::RGB(rgb)),
            None => Format::new(),
        };

        Self {
            percent: base.clone().set_num_format(PERCENT_NUM_FORMAT),
            datetime: base.clone().set_num_format(DATETIME_NUM_FORMAT),
            plain: base,
        }
    }
}
