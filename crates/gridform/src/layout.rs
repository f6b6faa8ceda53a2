//! Writing a sheet description onto a grid
//!
//! Header merging runs in two passes over the padded title matrix. The
//! vertical pass merges runs of equal titles stacked in one column. The
//! horizontal pass then merges runs of equal titles across columns within
//! one header row, skipping cells the vertical pass already claimed. So
//! `A#B, A#C, D, E#F` becomes `A` over the first two columns, `B` and `C`
//! below it, and `D` spanning both header rows.

use chrono::NaiveTime;
use gridform_core::style::{BorderLineStyle, Color, NumberFormat, Style, StyleId};
use gridform_core::{CellRange, CellValue, ConditionalFormatRule};

use crate::error::Result;
use crate::grid::Grid;
use crate::sheet::{Banner, SheetDescriptor};
use crate::style::StyleDescriptor;
use crate::style_cache::StyleCache;

/// Merge regions for a header title matrix, `titles[column][row]`.
///
/// Regions are relative to the top-left header cell. Single-cell runs are
/// never returned.
pub fn plan_header_merges<S: AsRef<str>>(titles: &[Vec<S>]) -> Vec<CellRange> {
    let cols = titles.len();
    let rows = titles.iter().map(Vec::len).max().unwrap_or(0);
    let at = |col: usize, row: usize| titles.get(col).and_then(|t| t.get(row)).map(AsRef::as_ref);

    let mut claimed = vec![vec![false; rows]; cols];
    let mut merges = Vec::new();

    for (col, column_titles) in titles.iter().enumerate() {
        let height = column_titles.len();
        let mut start = 0;
        for row in 1..=height {
            if row < height && at(col, row) == at(col, start) {
                continue;
            }
            let end = row - 1;
            if end > start {
                merges.push(region(start, end, col, col));
                for cell in &mut claimed[col][start..=end] {
                    *cell = true;
                }
            }
            start = row;
        }
    }

    for row in 0..rows {
        let mut start: Option<usize> = None;
        for col in 0..=cols {
            let free = col < cols && !claimed[col][row];
            if free && start.is_some_and(|s| at(s, row) == at(col, row)) {
                continue;
            }
            if let Some(s) = start.take() {
                if col - 1 > s {
                    merges.push(region(row, row, s, col - 1));
                }
            }
            if free {
                start = Some(col);
            }
        }
    }

    merges
}

fn region(first_row: usize, last_row: usize, first_col: usize, last_col: usize) -> CellRange {
    // header matrices are bounded by the sheet's column and row limits
    CellRange::from_indices(
        first_row as u32,
        first_col as u16,
        last_row as u32,
        last_col as u16,
    )
}

fn offset(range: &CellRange, row: u32, col: u16) -> CellRange {
    CellRange::from_indices(
        range.start.row + row,
        range.start.col + col,
        range.end.row + row,
        range.end.col + col,
    )
}

/// Lay out `sheet` on `grid`, resolving styles through `styles`.
///
/// The description is validated before the first cell is written.
pub fn write_sheet<R, G: Grid>(
    grid: &mut G,
    sheet: &SheetDescriptor<R>,
    styles: &mut StyleCache,
) -> Result<()> {
    sheet.validate()?;

    let mut row = sheet.start_row();
    if let Some(banner) = sheet.description_banner() {
        write_banner(grid, sheet, banner, row, styles)?;
        row += 1;
    }
    if let Some(banner) = sheet.main_title_banner() {
        write_banner(grid, sheet, banner, row, styles)?;
    }

    let merge_count = write_headers(grid, sheet, styles)?;
    write_data_rows(grid, sheet, styles)?;

    if let Some(width) = sheet.column_width_default() {
        grid.set_default_column_width(width);
    }
    grid.set_force_recalculation(sheet.forces_recalculation());
    if sheet.has_border() && sheet.column_count() > 0 {
        let last_row = (sheet.data_row_index() + sheet.rows().len() as u32).saturating_sub(1);
        let bounds = CellRange::from_indices(
            sheet.title_row_index(),
            sheet.start_column(),
            last_row,
            sheet.end_column_index(),
        );
        grid.add_conditional_format(
            ConditionalFormatRule::always(bounds)
                .with_format(Style::new().border(BorderLineStyle::Thin, Color::BLACK)),
        );
    }

    log::debug!(
        "laid out sheet '{}': {} columns, {} header rows, {} merges, {} data rows",
        sheet.name(),
        sheet.column_count(),
        sheet.header_row_count(),
        merge_count,
        sheet.rows().len()
    );
    Ok(())
}

fn write_banner<R, G: Grid>(
    grid: &mut G,
    sheet: &SheetDescriptor<R>,
    banner: &Banner,
    row: u32,
    styles: &mut StyleCache,
) -> Result<()> {
    let col = sheet.start_column();
    grid.set_value(row, col, CellValue::string(banner.text.as_str()))?;
    if let Some(style) = resolve(styles, &banner.style) {
        grid.set_style(row, col, style)?;
    }
    if let Some(height) = banner.height {
        grid.set_row_height(row, height);
    }

    let default_span = u16::try_from(sheet.column_count()).unwrap_or(u16::MAX);
    let span = banner.col_span.unwrap_or(default_span);
    if span > 1 {
        grid.merge(&CellRange::from_indices(
            row,
            col,
            row,
            col.saturating_add(span - 1),
        ))?;
    }
    Ok(())
}

fn write_headers<R, G: Grid>(
    grid: &mut G,
    sheet: &SheetDescriptor<R>,
    styles: &mut StyleCache,
) -> Result<usize> {
    let header_rows = sheet.header_row_count();
    let title_row = sheet.title_row_index();
    let title_style = resolve(styles, sheet.title_style());

    let mut titles = Vec::with_capacity(sheet.column_count());
    for column in sheet.columns() {
        let col = column.column_index();
        let padded = column.padded_row_titles(header_rows);
        for (depth, title) in padded.iter().enumerate() {
            let row = title_row + depth as u32;
            grid.set_value(row, col, CellValue::string(*title))?;
            if let Some(style) = title_style {
                grid.set_style(row, col, style)?;
            }
        }
        titles.push(padded);

        if let Some(width) = column.width() {
            grid.set_column_width(col, width);
        }
        if column.is_hidden() {
            grid.set_column_hidden(col, true);
        }
        if let Some(style) = resolve(styles, column.style()) {
            grid.set_column_default_style(col, style);
        }
    }

    let merges = plan_header_merges(&titles);
    for merge in &merges {
        let merge = offset(merge, title_row, sheet.start_column());
        log::trace!("merging header cells {merge}");
        grid.merge(&merge)?;
    }
    Ok(merges.len())
}

fn write_data_rows<R, G: Grid>(
    grid: &mut G,
    sheet: &SheetDescriptor<R>,
    styles: &mut StyleCache,
) -> Result<()> {
    let column_styles: Vec<Option<StyleId>> = sheet
        .columns()
        .iter()
        .map(|c| resolve(styles, c.style()))
        .collect();

    let mut row = sheet.data_row_index();
    for record in sheet.rows() {
        for (column, column_style) in sheet.columns().iter().zip(&column_styles) {
            let value = column.export(record);
            if value.is_empty() {
                continue;
            }
            let style = (*column_style).or_else(|| temporal_style(styles, &value));
            let col = column.column_index();
            grid.set_value(row, col, value)?;
            if let Some(style) = style {
                grid.set_style(row, col, style)?;
            }
        }
        row += 1;
    }
    Ok(())
}

fn resolve(styles: &mut StyleCache, descriptor: &StyleDescriptor) -> Option<StyleId> {
    (!descriptor.is_empty()).then(|| styles.get_style(descriptor))
}

fn temporal_style(styles: &mut StyleCache, value: &CellValue) -> Option<StyleId> {
    let dt = value.as_datetime()?;
    let format = if dt.time() == NaiveTime::MIN {
        NumberFormat::DATE
    } else {
        NumberFormat::DATETIME
    };
    Some(styles.get_style(&StyleDescriptor::new().number_format(format)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plan(titles: &[&[&str]]) -> Vec<String> {
        let titles: Vec<Vec<&str>> = titles.iter().map(|t| t.to_vec()).collect();
        plan_header_merges(&titles)
            .iter()
            .map(|r| r.to_string())
            .collect()
    }

    #[test]
    fn test_two_pass_merge() {
        // A#B, A#C, D, E#F
        let merges = plan(&[&["A", "B"], &["A", "C"], &["D", "D"], &["E", "F"]]);
        assert_eq!(merges, vec!["C1:C2", "A1:B1"]);
    }

    #[test]
    fn test_claimed_cells_split_horizontal_runs() {
        let merges = plan(&[&["A", "A"], &["A", "C"], &["D", "D"], &["E", "F"]]);
        assert_eq!(merges, vec!["A1:A2", "C1:C2"]);
    }

    #[test]
    fn test_single_row_headers() {
        assert!(plan(&[&["A"], &["B"], &["C"]]).is_empty());
        assert_eq!(plan(&[&["X"], &["X"], &["Y"], &["X"]]), vec!["A1:B1"]);
    }

    #[test]
    fn test_tall_header_runs() {
        let merges = plan(&[
            &["Group", "Sub", "Sub"],
            &["Group", "Other", "Leaf"],
            &["Solo", "Solo", "Solo"],
        ]);
        assert_eq!(merges, vec!["A2:A3", "C1:C3", "A1:B1"]);
    }

    #[test]
    fn test_offset_regions() {
        let r = CellRange::parse("A1:B2").unwrap();
        assert_eq!(offset(&r, 3, 2).to_string(), "C4:D5");
    }
}
