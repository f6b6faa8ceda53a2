//! Reading typed records back out of a grid

use std::fmt;

use ahash::AHashMap;
use gridform_core::CellValue;

use crate::column::CellOutcome;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::sheet::SheetDescriptor;

/// Every problem found in one import, one line per rejected row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportErrors {
    lines: Vec<String>,
}

impl ImportErrors {
    /// Lines in row order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of rejected rows
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// No row was rejected
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn push(&mut self, line: String) {
        self.lines.push(line);
    }
}

impl fmt::Display for ImportErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// Parse every non-blank data row of `grid` into a record.
///
/// Rows run from the sheet's first data row to the grid's last populated
/// row. A row whose cells under the sheet's columns are all blank is
/// skipped. Any rejected cell or duplicate key fails the whole import; the
/// error lists every offending row by its zero-based grid index.
pub fn import_rows<R: Default, G: Grid>(grid: &G, sheet: &SheetDescriptor<R>) -> Result<Vec<R>> {
    sheet.validate()?;

    let first_row = sheet.data_row_index();
    let Some(last_row) = grid.last_row() else {
        return Ok(Vec::new());
    };

    let mut errors = ImportErrors::default();
    let mut first_seen: AHashMap<String, u32> = AHashMap::new();
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in first_row..=last_row {
        let cells: Vec<CellValue> = sheet
            .columns()
            .iter()
            .map(|c| grid.value(row, c.column_index()))
            .collect();
        if cells.iter().all(CellValue::is_blank) {
            skipped += 1;
            continue;
        }

        let mut record = R::default();
        let mut problems = String::new();
        let mut key = String::new();
        for (column, raw) in sheet.columns().iter().zip(&cells) {
            match column.import(&mut record, raw) {
                CellOutcome::Accepted => {}
                CellOutcome::KeyPart(part) => {
                    key.push_str(part.as_deref().unwrap_or("null"));
                    key.push('|');
                }
                CellOutcome::Rejected(message) => {
                    problems.push_str(&format!("column '{}': {message}; ", column.last_title()));
                }
            }
        }

        if !problems.is_empty() {
            errors.push(format!("row {row}: {problems}"));
        } else if key.is_empty() {
            records.push(record);
        } else if let Some(first) = first_seen.get(&key) {
            errors.push(format!("row {row}: duplicate of row {first}"));
        } else {
            first_seen.insert(key, row);
            records.push(record);
        }
    }

    log::debug!(
        "imported sheet '{}': {} records, {} rejected rows, {} blank rows",
        sheet.name(),
        records.len(),
        errors.len(),
        skipped
    );

    if errors.is_empty() {
        Ok(records)
    } else {
        Err(Error::RowValidation(errors))
    }
}
