//! Header checks for uploaded documents

use gridform_core::{CellAddress, Workbook};

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::sheet::SheetDescriptor;

/// Check that the uploaded sheet still has the expected bottom header row.
///
/// Sheets with template validation turned off pass without a lookup.
pub fn validate_template<R>(workbook: &Workbook, sheet: &SheetDescriptor<R>) -> Result<()> {
    if !sheet.validates_template() {
        return Ok(());
    }
    let grid = workbook
        .worksheet_by_name(sheet.name())
        .ok_or_else(|| Error::SheetNotFound(sheet.name().to_string()))?;
    check_headers(grid, sheet)
}

/// Compare the last header row of `grid` with each column's last title.
///
/// Stops at the first mismatch in column order. Surrounding whitespace on
/// either side is ignored.
pub fn check_headers<R, G: Grid>(grid: &G, sheet: &SheetDescriptor<R>) -> Result<()> {
    if sheet.header_row_count() == 0 {
        return Ok(());
    }
    let header_row = sheet.data_row_index() - 1;

    for column in sheet.columns() {
        let expected = column.last_title();
        let found = grid.value(header_row, column.column_index()).to_string();
        if found.trim() != expected.trim() {
            return Err(Error::TemplateMismatch {
                sheet: sheet.name().to_string(),
                column: CellAddress::column_to_letters(column.column_index()),
                expected: expected.to_string(),
                found,
            });
        }
    }
    Ok(())
}
