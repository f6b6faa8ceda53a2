//! The cell grid that layout writes to and import reads from

use gridform_core::style::StyleId;
use gridform_core::{CellRange, CellValue, ConditionalFormatRule, Result, Worksheet};

/// Mutable 2-D cell grid
///
/// Layout and import only talk to a sheet through this trait.
pub trait Grid {
    /// Sheet name
    fn name(&self) -> &str;

    /// Value at a position (`Empty` when unset)
    fn value(&self, row: u32, col: u16) -> CellValue;

    /// Store a value
    fn set_value(&mut self, row: u32, col: u16, value: CellValue) -> Result<()>;

    /// Give a cell an explicit style
    fn set_style(&mut self, row: u32, col: u16, style: StyleId) -> Result<()>;

    /// Merge a rectangular region
    fn merge(&mut self, region: &CellRange) -> Result<()>;

    /// Column width in characters
    fn set_column_width(&mut self, col: u16, width: f64);

    /// Hide or show a column
    fn set_column_hidden(&mut self, col: u16, hidden: bool);

    /// Style for cells of a column without an explicit style
    fn set_column_default_style(&mut self, col: u16, style: StyleId);

    /// Row height in points
    fn set_row_height(&mut self, row: u32, height: f64);

    /// Width of columns without a custom width
    fn set_default_column_width(&mut self, width: f64);

    /// Add a conditional formatting rule
    fn add_conditional_format(&mut self, rule: ConditionalFormatRule);

    /// Ask consumers to recalculate formulas on open
    fn set_force_recalculation(&mut self, force: bool);

    /// Highest row holding a value
    fn last_row(&self) -> Option<u32>;
}

impl Grid for Worksheet {
    fn name(&self) -> &str {
        Worksheet::name(self)
    }

    fn value(&self, row: u32, col: u16) -> CellValue {
        self.get_value_at(row, col)
    }

    fn set_value(&mut self, row: u32, col: u16, value: CellValue) -> Result<()> {
        self.set_cell_value_at(row, col, value)
    }

    fn set_style(&mut self, row: u32, col: u16, style: StyleId) -> Result<()> {
        self.set_cell_style_at(row, col, Some(style))
    }

    fn merge(&mut self, region: &CellRange) -> Result<()> {
        self.merge_cells(region)
    }

    fn set_column_width(&mut self, col: u16, width: f64) {
        Worksheet::set_column_width(self, col, width);
    }

    fn set_column_hidden(&mut self, col: u16, hidden: bool) {
        Worksheet::set_column_hidden(self, col, hidden);
    }

    fn set_column_default_style(&mut self, col: u16, style: StyleId) {
        Worksheet::set_column_default_style(self, col, Some(style));
    }

    fn set_row_height(&mut self, row: u32, height: f64) {
        Worksheet::set_row_height(self, row, height);
    }

    fn set_default_column_width(&mut self, width: f64) {
        Worksheet::set_default_column_width(self, width);
    }

    fn add_conditional_format(&mut self, rule: ConditionalFormatRule) {
        Worksheet::add_conditional_format(self, rule);
    }

    fn set_force_recalculation(&mut self, force: bool) {
        self.set_force_full_calculation(force);
    }

    fn last_row(&self) -> Option<u32> {
        Worksheet::last_row(self)
    }
}
