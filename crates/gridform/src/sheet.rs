//! Sheet descriptors

use ahash::AHashSet;

use crate::column::ColumnDescriptor;
use crate::error::{Error, Result};
use crate::style::StyleDescriptor;

/// A single-row text banner above the column headers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Banner {
    /// Text written in the banner's first cell
    pub text: String,
    /// Banner style
    pub style: StyleDescriptor,
    /// Row height in points
    pub height: Option<f64>,
    /// Number of columns merged; defaults to the sheet's column count
    pub col_span: Option<u16>,
}

impl Banner {
    /// Banner with text and no styling
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the style
    pub fn with_style(mut self, style: StyleDescriptor) -> Self {
        self.style = style;
        self
    }

    /// Set the row height
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Set the number of merged columns
    pub fn with_col_span(mut self, span: u16) -> Self {
        self.col_span = Some(span);
        self
    }
}

/// Description of one sheet: its columns, banners, offsets and records.
///
/// Rows from the top: optional description banner, optional main title,
/// the header rows, then one row per record.
///
/// ```
/// use gridform::{Banner, Column, SheetDescriptor};
///
/// #[derive(Default)]
/// struct Row {
///     id: i64,
/// }
///
/// let sheet = SheetDescriptor::new("Rows")
///     .description(Banner::new("Generated report"))
///     .column(Column::new("Id").getter(|r: &Row| Some(r.id)))
///     .start_row_index(2);
///
/// assert_eq!(sheet.title_row_index(), 3);
/// assert_eq!(sheet.data_row_index(), 4);
/// ```
pub struct SheetDescriptor<R> {
    sheet_name: String,
    columns: Vec<ColumnDescriptor<R>>,
    data_rows: Vec<R>,
    description: Option<Banner>,
    main_title: Option<Banner>,
    column_title_style: StyleDescriptor,
    start_row_index: u32,
    start_column_index: u16,
    template_validation: bool,
    border: bool,
    default_column_width: Option<f64>,
    force_formula_recalculation: bool,
}

impl<R> SheetDescriptor<R> {
    /// Empty sheet description
    pub fn new<S: Into<String>>(sheet_name: S) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            columns: Vec::new(),
            data_rows: Vec::new(),
            description: None,
            main_title: None,
            column_title_style: StyleDescriptor::default(),
            start_row_index: 0,
            start_column_index: 0,
            template_validation: true,
            border: false,
            default_column_width: None,
            force_formula_recalculation: true,
        }
    }

    /// Append a column
    pub fn column<C: Into<ColumnDescriptor<R>>>(mut self, column: C) -> Self {
        self.push_column(column);
        self
    }

    /// Append a column in place
    pub fn push_column<C: Into<ColumnDescriptor<R>>>(&mut self, column: C) {
        let mut column = column.into();
        column.set_column_index(self.column_at(self.columns.len()));
        self.columns.push(column);
    }

    /// Records written on export
    pub fn data_rows(mut self, rows: Vec<R>) -> Self {
        self.data_rows = rows;
        self
    }

    /// Banner above the main title
    pub fn description(mut self, banner: Banner) -> Self {
        self.description = Some(banner);
        self
    }

    /// Banner directly above the headers
    pub fn main_title(mut self, banner: Banner) -> Self {
        self.main_title = Some(banner);
        self
    }

    /// Style of the header cells
    pub fn column_title_style(mut self, style: StyleDescriptor) -> Self {
        self.column_title_style = style;
        self
    }

    /// First row used by the sheet
    pub fn start_row_index(mut self, row: u32) -> Self {
        self.set_start_row_index(row);
        self
    }

    /// First column used by the sheet
    pub fn start_column_index(mut self, col: u16) -> Self {
        self.set_start_column_index(col);
        self
    }

    /// Move the sheet down
    pub fn set_start_row_index(&mut self, row: u32) {
        self.start_row_index = row;
    }

    /// Move the sheet sideways, renumbering every column
    pub fn set_start_column_index(&mut self, col: u16) {
        self.start_column_index = col;
        for i in 0..self.columns.len() {
            let index = self.column_at(i);
            self.columns[i].set_column_index(index);
        }
    }

    /// Check uploaded headers before import (default on)
    pub fn template_validation(mut self, enabled: bool) -> Self {
        self.template_validation = enabled;
        self
    }

    /// Outline every header and data cell (default off)
    pub fn border(mut self, enabled: bool) -> Self {
        self.border = enabled;
        self
    }

    /// Width of columns without their own width
    pub fn default_column_width(mut self, width: f64) -> Self {
        self.default_column_width = Some(width);
        self
    }

    /// Recalculate formulas when the document is opened (default on)
    pub fn force_formula_recalculation(mut self, enabled: bool) -> Self {
        self.force_formula_recalculation = enabled;
        self
    }

    fn column_at(&self, position: usize) -> u16 {
        let offset = u16::try_from(position).unwrap_or(u16::MAX);
        self.start_column_index.saturating_add(offset)
    }

    // === Accessors ===

    /// Sheet name
    pub fn name(&self) -> &str {
        &self.sheet_name
    }

    /// Columns in order
    pub fn columns(&self) -> &[ColumnDescriptor<R>] {
        &self.columns
    }

    /// Records to export
    pub fn rows(&self) -> &[R] {
        &self.data_rows
    }

    /// Description banner
    pub fn description_banner(&self) -> Option<&Banner> {
        self.description.as_ref()
    }

    /// Main title banner
    pub fn main_title_banner(&self) -> Option<&Banner> {
        self.main_title.as_ref()
    }

    /// Header cell style
    pub fn title_style(&self) -> &StyleDescriptor {
        &self.column_title_style
    }

    /// First row used by the sheet
    pub fn start_row(&self) -> u32 {
        self.start_row_index
    }

    /// First column used by the sheet
    pub fn start_column(&self) -> u16 {
        self.start_column_index
    }

    /// Uploaded headers are checked before import
    pub fn validates_template(&self) -> bool {
        self.template_validation
    }

    /// Header and data cells get an outline
    pub fn has_border(&self) -> bool {
        self.border
    }

    /// Width of columns without their own width
    pub fn column_width_default(&self) -> Option<f64> {
        self.default_column_width
    }

    /// Formulas are recalculated when the document is opened
    pub fn forces_recalculation(&self) -> bool {
        self.force_formula_recalculation
    }

    // === Derived geometry ===

    /// First header row
    pub fn title_row_index(&self) -> u32 {
        self.start_row_index
            + u32::from(self.description.is_some())
            + u32::from(self.main_title.is_some())
    }

    /// Number of stacked header rows
    pub fn header_row_count(&self) -> usize {
        self.columns
            .iter()
            .map(|c| c.row_titles().len())
            .max()
            .unwrap_or(0)
    }

    /// First data row
    pub fn data_row_index(&self) -> u32 {
        let headers = u32::try_from(self.header_row_count()).unwrap_or(u32::MAX);
        self.title_row_index().saturating_add(headers)
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Last column used by the sheet
    pub fn end_column_index(&self) -> u16 {
        self.column_at(self.columns.len().saturating_sub(1))
    }

    /// Reject descriptions that cannot be laid out
    pub fn validate(&self) -> Result<()> {
        if self.sheet_name.trim().is_empty() {
            return Err(Error::EmptySheetName);
        }

        let mut seen = AHashSet::with_capacity(self.columns.len());
        for column in &self.columns {
            if !seen.insert(column.title()) {
                return Err(Error::DuplicateColumnTitle {
                    sheet: self.sheet_name.clone(),
                    title: column.title().to_string(),
                });
            }
        }

        let expected = self.header_row_count();
        for column in &self.columns {
            let found = column.row_titles().len();
            if found != 1 && found != expected {
                return Err(Error::InconsistentHeaderRows {
                    sheet: self.sheet_name.clone(),
                    title: column.title().to_string(),
                    found,
                    expected,
                });
            }
        }

        Ok(())
    }
}

impl<R> std::fmt::Debug for SheetDescriptor<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetDescriptor")
            .field("sheet_name", &self.sheet_name)
            .field("columns", &self.columns)
            .field("data_rows", &self.data_rows.len())
            .field("start_row_index", &self.start_row_index)
            .field("start_column_index", &self.start_column_index)
            .finish_non_exhaustive()
    }
}
