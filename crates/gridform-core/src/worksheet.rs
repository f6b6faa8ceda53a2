//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellData, CellRange, CellStorage, CellValue};
use crate::column::Column;
use crate::conditional_format::ConditionalFormatRule;
use crate::error::{Error, Result};
use crate::style::StyleId;
use crate::{MAX_COLS, MAX_ROWS};

/// Default column width in characters
pub const DEFAULT_COLUMN_WIDTH: f64 = 8.43;

/// A single sheet: sparse cells plus layout metadata
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Worksheet {
    name: String,
    cells: CellStorage,
    columns: BTreeMap<u16, Column>,
    row_heights: BTreeMap<u32, f64>,
    default_column_width: f64,
    merged_regions: Vec<CellRange>,
    conditional_formats: Vec<ConditionalFormatRule>,
    force_full_calculation: bool,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
            columns: BTreeMap::new(),
            row_heights: BTreeMap::new(),
            default_column_width: DEFAULT_COLUMN_WIDTH,
            merged_regions: Vec::new(),
            conditional_formats: Vec::new(),
            force_full_calculation: false,
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Cell Access ===

    /// Get cell value by A1 address
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Get cell value by indices (`Empty` for missing cells)
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cells
            .get(row, col)
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }

    /// Explicit style of a cell, if any
    pub fn cell_style_at(&self, row: u32, col: u16) -> Option<StyleId> {
        self.cells.get(row, col).and_then(|c| c.style)
    }

    /// Explicit style of a cell, falling back to its column's default style
    pub fn effective_style_at(&self, row: u32, col: u16) -> Option<StyleId> {
        self.cell_style_at(row, col)
            .or_else(|| self.columns.get(&col).and_then(|c| c.default_style))
    }

    // === Cell Modification ===

    /// Set a cell value by A1 address
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by row and column indices
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        validate_cell_position(row, col)?;
        self.cells.set_value(row, col, value.into());
        Ok(())
    }

    /// Set or clear the explicit style of a cell
    pub fn set_cell_style_at(&mut self, row: u32, col: u16, style: Option<StyleId>) -> Result<()> {
        validate_cell_position(row, col)?;
        self.cells.set_style(row, col, style);
        Ok(())
    }

    // === Bounds ===

    /// Bounds of all stored cells
    pub fn used_range(&self) -> Option<CellRange> {
        self.cells
            .used_bounds()
            .map(|(min_row, min_col, max_row, max_col)| {
                CellRange::from_indices(min_row, min_col, max_row, max_col)
            })
    }

    /// Highest row index holding a value
    pub fn last_row(&self) -> Option<u32> {
        self.cells.last_value_row()
    }

    // === Row/Column Operations ===

    /// Custom row height, if set
    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.row_heights.get(&row).copied()
    }

    /// Set row height in points
    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.row_heights.insert(row, height);
    }

    /// Column metadata, if any was set
    pub fn column(&self, col: u16) -> Option<&Column> {
        self.columns.get(&col)
    }

    /// Effective column width
    pub fn column_width(&self, col: u16) -> f64 {
        self.columns
            .get(&col)
            .and_then(|c| c.width)
            .unwrap_or(self.default_column_width)
    }

    /// Set column width in characters
    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.columns.entry(col).or_default().width = Some(width);
    }

    /// Check if column is hidden
    pub fn is_column_hidden(&self, col: u16) -> bool {
        self.columns.get(&col).is_some_and(|c| c.hidden)
    }

    /// Set column hidden state
    pub fn set_column_hidden(&mut self, col: u16, hidden: bool) {
        self.columns.entry(col).or_default().hidden = hidden;
    }

    /// Set the style used by cells of a column that have no explicit style
    pub fn set_column_default_style(&mut self, col: u16, style: Option<StyleId>) {
        self.columns.entry(col).or_default().default_style = style;
    }

    /// Iterate over columns with custom settings
    pub fn columns(&self) -> impl Iterator<Item = (u16, &Column)> {
        self.columns
            .iter()
            .filter(|(_, c)| c.has_custom_settings())
            .map(|(&i, c)| (i, c))
    }

    /// Width used by columns without a custom width
    pub fn default_column_width(&self) -> f64 {
        self.default_column_width
    }

    /// Set the width used by columns without a custom width
    pub fn set_default_column_width(&mut self, width: f64) {
        self.default_column_width = width;
    }

    // === Merged Cells ===

    /// Get merged regions
    pub fn merged_regions(&self) -> &[CellRange] {
        &self.merged_regions
    }

    /// Merge cells; overlapping an existing region is an error
    pub fn merge_cells(&mut self, range: &CellRange) -> Result<()> {
        validate_cell_position(range.end.row, range.end.col)?;
        if self.merged_regions.iter().any(|r| r.overlaps(range)) {
            return Err(Error::MergedCellConflict(range.to_string()));
        }
        self.merged_regions.push(*range);
        Ok(())
    }

    /// Unmerge cells, returning whether the region existed
    pub fn unmerge_cells(&mut self, range: &CellRange) -> bool {
        let before = self.merged_regions.len();
        self.merged_regions.retain(|r| r != range);
        self.merged_regions.len() != before
    }

    /// Merged region covering a cell, if any
    pub fn merged_region_at(&self, row: u32, col: u16) -> Option<&CellRange> {
        self.merged_regions.iter().find(|r| r.contains(row, col))
    }

    // === Conditional Formatting ===

    /// Add a conditional formatting rule
    pub fn add_conditional_format(&mut self, rule: ConditionalFormatRule) {
        self.conditional_formats.push(rule);
    }

    /// Get all conditional formatting rules
    pub fn conditional_formats(&self) -> &[ConditionalFormatRule] {
        &self.conditional_formats
    }

    // === Calculation ===

    /// Whether formulas must be recalculated when the document is opened
    pub fn force_full_calculation(&self) -> bool {
        self.force_full_calculation
    }

    /// Request formula recalculation when the document is opened
    pub fn set_force_full_calculation(&mut self, force: bool) {
        self.force_full_calculation = force;
    }

    // === Iteration ===

    /// Get the number of stored cells
    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    /// Check if the worksheet has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over stored cells of one row
    pub fn iter_row(&self, row: u32) -> impl Iterator<Item = (u16, &CellData)> {
        self.cells.iter_row(row)
    }
}

fn validate_cell_position(row: u32, col: u16) -> Result<()> {
    if row >= MAX_ROWS {
        return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
    }
    if col >= MAX_COLS {
        return Err(Error::ColumnOutOfBounds(u32::from(col), MAX_COLS - 1));
    }
    Ok(())
}
