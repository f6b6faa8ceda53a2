//! Building documents from sheet descriptions and reading them back

use gridform_core::style::Style;
use gridform_core::{Workbook, Worksheet};

use crate::error::{Error, Result};
use crate::import::import_rows;
use crate::layout::write_sheet;
use crate::sheet::SheetDescriptor;
use crate::style_cache::StyleCache;
use crate::template::validate_template;

/// Builds one document; owns its sheets and its style cache.
///
/// ```
/// use gridform::{Column, SheetDescriptor, WorkbookBuilder};
///
/// struct City {
///     name: String,
/// }
///
/// let sheet = SheetDescriptor::new("Cities")
///     .column(Column::new("Name").getter(|c: &City| Some(c.name.clone())))
///     .data_rows(vec![City { name: "Oslo".into() }]);
///
/// let mut builder = WorkbookBuilder::new();
/// builder.add_sheet(&sheet).unwrap();
/// let workbook = builder.finish();
/// assert_eq!(workbook.sheet_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct WorkbookBuilder {
    workbook: Workbook,
    styles: StyleCache,
}

impl WorkbookBuilder {
    /// Builder whose styles start from the default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder whose styles start from `base`
    pub fn with_base_style(base: Style) -> Self {
        Self {
            workbook: Workbook::new(),
            styles: StyleCache::with_base_style(base),
        }
    }

    /// Lay out a sheet and add it to the document.
    ///
    /// On error the document is left as it was.
    pub fn add_sheet<R>(&mut self, sheet: &SheetDescriptor<R>) -> Result<usize> {
        let name = sheet.name();
        if name.trim().is_empty() {
            return Err(Error::EmptySheetName);
        }
        let lower = name.to_lowercase();
        if self
            .workbook
            .worksheets()
            .any(|ws| ws.name().to_lowercase() == lower)
        {
            return Err(Error::DuplicateSheetName(name.to_string()));
        }

        let mut worksheet = Worksheet::new(name);
        write_sheet(&mut worksheet, sheet, &mut self.styles)?;
        Ok(self.workbook.add_existing_worksheet(worksheet)?)
    }

    /// The document's style cache, for styling cells outside the layout
    pub fn style_cache(&mut self) -> &mut StyleCache {
        &mut self.styles
    }

    /// Sheets laid out so far
    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    /// Finish the document, handing it the cached styles
    pub fn finish(self) -> Workbook {
        let mut workbook = self.workbook;
        workbook.set_styles(self.styles.into_pool());
        workbook
    }
}

/// Validate the uploaded headers of `sheet`, then import its rows
pub fn read_sheet<R: Default>(workbook: &Workbook, sheet: &SheetDescriptor<R>) -> Result<Vec<R>> {
    sheet.validate()?;
    validate_template(workbook, sheet)?;
    let grid = workbook
        .worksheet_by_name(sheet.name())
        .ok_or_else(|| Error::SheetNotFound(sheet.name().to_string()))?;
    import_rows(grid, sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;

    #[derive(Default)]
    struct Rec {
        v: i64,
    }

    fn sheet(name: &str) -> SheetDescriptor<Rec> {
        SheetDescriptor::new(name).column(
            Column::new("V")
                .getter(|r: &Rec| Some(r.v))
                .setter(|r: &mut Rec, v: Option<i64>| r.v = v.unwrap_or_default()),
        )
    }

    #[test]
    fn test_duplicate_sheet_names_rejected() {
        let mut builder = WorkbookBuilder::new();
        builder.add_sheet(&sheet("Data")).unwrap();
        assert!(matches!(
            builder.add_sheet(&sheet("data")),
            Err(Error::DuplicateSheetName(_))
        ));
        assert!(matches!(builder.add_sheet(&sheet(" ")), Err(Error::EmptySheetName)));
        assert_eq!(builder.workbook().sheet_count(), 1);
    }

    #[test]
    fn test_failed_layout_leaves_no_sheet() {
        let bad = sheet("Bad").column(Column::<Rec, i64>::new("V"));
        let mut builder = WorkbookBuilder::new();
        assert!(matches!(
            builder.add_sheet(&bad),
            Err(Error::DuplicateColumnTitle { .. })
        ));
        assert!(builder.workbook().is_empty());
    }

    #[test]
    fn test_styles_move_into_workbook() {
        let mut builder = WorkbookBuilder::with_base_style(Style::new().font_name("Arial"));
        let id = builder
            .style_cache()
            .get_style(&crate::StyleDescriptor::new().bold(true));
        let workbook = builder.finish();
        let style = workbook.style(id).unwrap();
        assert!(style.font.bold);
        assert_eq!(style.font.name, "Arial");
    }

    #[test]
    fn test_read_sheet_round_trip() {
        let mut builder = WorkbookBuilder::new();
        builder
            .add_sheet(&sheet("Data").data_rows(vec![Rec { v: 4 }, Rec { v: 9 }]))
            .unwrap();
        let workbook = builder.finish();

        let values: Vec<i64> = read_sheet(&workbook, &sheet("Data"))
            .unwrap()
            .into_iter()
            .map(|r| r.v)
            .collect();
        assert_eq!(values, vec![4, 9]);
        assert!(matches!(
            read_sheet(&workbook, &sheet("Missing")),
            Err(Error::SheetNotFound(_))
        ));
    }
}
