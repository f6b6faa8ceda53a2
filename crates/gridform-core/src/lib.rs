//! # gridform-core
//!
//! In-memory spreadsheet model used by gridform.
//!
//! - [`CellValue`] - Cell values (numbers, strings, booleans, dates, formulas)
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and ranges
//! - [`Style`] and [`StylePool`] - Cell formatting stored once per document
//! - [`Workbook`], [`Worksheet`] - The document structures
//!
//! ## Example
//!
//! ```rust
//! use gridform_core::{CellRange, CellValue, Workbook, Worksheet};
//!
//! let mut sheet = Worksheet::new("People");
//! sheet.set_cell_value("A1", "Name").unwrap();
//! sheet.set_cell_value_at(1, 0, CellValue::string("Ada")).unwrap();
//! sheet.merge_cells(&CellRange::parse("A1:B1").unwrap()).unwrap();
//!
//! let mut workbook = Workbook::new();
//! workbook.add_existing_worksheet(sheet).unwrap();
//! assert_eq!(workbook.sheet_count(), 1);
//! ```

pub mod cell;
pub mod column;
pub mod conditional_format;
pub mod error;
pub mod style;
pub mod workbook;
pub mod worksheet;

pub use cell::{CellAddress, CellData, CellRange, CellValue};
pub use column::Column;
pub use conditional_format::ConditionalFormatRule;
pub use error::{Error, Result};
pub use workbook::Workbook;
pub use worksheet::{Worksheet, DEFAULT_COLUMN_WIDTH};

pub use style::{
    Alignment, BorderEdge, BorderLineStyle, BorderStyle, Color, FontStyle, HorizontalAlignment,
    NumberFormat, Style, StyleId, StylePool, VerticalAlignment,
};

/// Maximum number of rows in a worksheet
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
