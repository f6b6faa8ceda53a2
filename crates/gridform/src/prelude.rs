//! Common imports
//!
//! ```rust
//! use gridform::prelude::*;
//! ```

pub use crate::{
    read_sheet, Banner, CellType, Column, ColumnDescriptor, DocumentFormat, Error, Result,
    SheetDescriptor, StyleCache, StyleDescriptor, WorkbookBuilder,
};

pub use gridform_core::style::{
    BorderLineStyle, Color, HorizontalAlignment, Style, VerticalAlignment,
};
pub use gridform_core::{CellValue, Workbook, Worksheet};
