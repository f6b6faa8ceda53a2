//! Cell storage implementation
//!
//! Sparse row-based storage: only cells with a value or an explicit style
//! are kept, in a `BTreeMap<row, BTreeMap<col, CellData>>`.

use std::collections::BTreeMap;

use super::CellValue;
use crate::style::StyleId;

/// Complete data for a single cell
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellData {
    /// The cell's value
    pub value: CellValue,
    /// Explicit style, if any (falls back to the column default)
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub style: Option<StyleId>,
}

impl CellData {
    /// Create a new cell with a value and no explicit style
    pub fn new(value: CellValue) -> Self {
        Self { value, style: None }
    }

    /// Create a new cell with a value and style
    pub fn with_style(value: CellValue, style: StyleId) -> Self {
        Self {
            value,
            style: Some(style),
        }
    }

    /// No value and no explicit style
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.style.is_none()
    }
}

/// Sparse storage for worksheet cells
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellStorage {
    rows: BTreeMap<u32, BTreeMap<u16, CellData>>,
}

impl CellStorage {
    /// Create a new empty cell storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cell
    pub fn get(&self, row: u32, col: u16) -> Option<&CellData> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Get a mutable cell
    pub fn get_mut(&mut self, row: u32, col: u16) -> Option<&mut CellData> {
        self.rows.get_mut(&row).and_then(|r| r.get_mut(&col))
    }

    /// Store a cell; empty cell data removes the entry.
    pub fn set(&mut self, row: u32, col: u16, data: CellData) {
        if data.is_empty() {
            self.remove(row, col);
        } else {
            self.rows.entry(row).or_default().insert(col, data);
        }
    }

    /// Set just the cell value (preserving style)
    pub fn set_value(&mut self, row: u32, col: u16, value: CellValue) {
        match self.get_mut(row, col) {
            Some(cell) => {
                cell.value = value;
                if cell.is_empty() {
                    self.remove(row, col);
                }
            }
            None if !value.is_empty() => self.set(row, col, CellData::new(value)),
            None => {}
        }
    }

    /// Set just the cell style (preserving value)
    pub fn set_style(&mut self, row: u32, col: u16, style: Option<StyleId>) {
        match self.get_mut(row, col) {
            Some(cell) => {
                cell.style = style;
                if cell.is_empty() {
                    self.remove(row, col);
                }
            }
            None => {
                if let Some(style) = style {
                    self.set(row, col, CellData::with_style(CellValue::Empty, style));
                }
            }
        }
    }

    /// Remove a cell
    pub fn remove(&mut self, row: u32, col: u16) -> Option<CellData> {
        let row_map = self.rows.get_mut(&row)?;
        let removed = row_map.remove(&col);
        if row_map.is_empty() {
            self.rows.remove(&row);
        }
        removed
    }

    /// Number of stored cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    /// Check if storage is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Highest row index holding at least one non-empty value
    pub fn last_value_row(&self) -> Option<u32> {
        self.rows
            .iter()
            .rev()
            .find(|(_, cols)| cols.values().any(|c| !c.value.is_empty()))
            .map(|(&row, _)| row)
    }

    /// Bounds of stored cells as `(min_row, min_col, max_row, max_col)`
    pub fn used_bounds(&self) -> Option<(u32, u16, u32, u16)> {
        let min_row = *self.rows.keys().next()?;
        let max_row = *self.rows.keys().next_back()?;

        let mut min_col = u16::MAX;
        let mut max_col = 0u16;
        for cols in self.rows.values() {
            if let Some(&col) = cols.keys().next() {
                min_col = min_col.min(col);
            }
            if let Some(&col) = cols.keys().next_back() {
                max_col = max_col.max(col);
            }
        }

        Some((min_row, min_col, max_row, max_col))
    }

    /// Iterate over all cells in row order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, data)| (row, col, data)))
    }

    /// Iterate over cells in a specific row
    pub fn iter_row(&self, row: u32) -> impl Iterator<Item = (u16, &CellData)> {
        self.rows
            .get(&row)
            .into_iter()
            .flat_map(|cols| cols.iter().map(|(&col, data)| (col, data)))
    }
}
