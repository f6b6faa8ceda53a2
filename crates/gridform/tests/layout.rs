//! Layout tests: banners, header merges, column settings and data styles

use chrono::{NaiveDate, NaiveDateTime};
use gridform::prelude::*;
use gridform::{plan_header_merges, Error};
use gridform_core::style::NumberFormat;
use gridform_core::CellRange;
use pretty_assertions::assert_eq;

#[derive(Debug, Default, Clone)]
struct Cells {
    a: String,
    b: String,
    d: String,
    f: String,
}

fn grouped(rows: Vec<Cells>) -> SheetDescriptor<Cells> {
    SheetDescriptor::new("Grouped")
        .column(Column::new("A#B").getter(|r: &Cells| Some(r.a.clone())))
        .column(Column::new("A#C").getter(|r: &Cells| Some(r.b.clone())))
        .column(Column::new("D").getter(|r: &Cells| Some(r.d.clone())))
        .column(Column::new("E#F").getter(|r: &Cells| Some(r.f.clone())))
        .data_rows(rows)
}

fn regions(ws: &Worksheet) -> Vec<String> {
    ws.merged_regions().iter().map(CellRange::to_string).collect()
}

#[test]
fn header_padding_repeats_last_segment() {
    let sheet = SheetDescriptor::<Cells>::new("S")
        .column(Column::<Cells, String>::new("Id"))
        .column(Column::<Cells, String>::new("Name#First"))
        .column(Column::<Cells, String>::new("Name#Last"));
    let rows = sheet.header_row_count();
    assert_eq!(rows, 2);

    let padded: Vec<Vec<&str>> = sheet
        .columns()
        .iter()
        .map(|c| c.padded_row_titles(rows))
        .collect();
    assert_eq!(
        padded,
        vec![
            vec!["Id", "Id"],
            vec!["Name", "First"],
            vec!["Name", "Last"],
        ]
    );
}

#[test]
fn merge_plan_for_grouped_headers() {
    let titles = vec![
        vec!["A", "B"],
        vec!["A", "C"],
        vec!["D", "D"],
        vec!["E", "F"],
    ];
    let merges: Vec<String> = plan_header_merges(&titles)
        .iter()
        .map(CellRange::to_string)
        .collect();
    // D spans both header rows; A spans the first two columns
    assert_eq!(merges, vec!["C1:C2", "A1:B1"]);
}

#[test]
fn headers_and_merges_at_origin() {
    let mut builder = WorkbookBuilder::new();
    builder.add_sheet(&grouped(Vec::new())).unwrap();
    let workbook = builder.finish();
    let ws = workbook.worksheet_by_name("Grouped").unwrap();

    assert_eq!(regions(ws), vec!["C1:C2", "A1:B1"]);
    let header: Vec<String> = (0..2u32)
        .flat_map(|r| (0..4u16).map(move |c| (r, c)))
        .map(|(r, c)| ws.get_value_at(r, c).to_string())
        .collect();
    assert_eq!(header, vec!["A", "A", "D", "E", "B", "C", "D", "F"]);
}

#[test]
fn banners_and_offsets_shift_everything() {
    let sheet = grouped(vec![Cells {
        a: "1".into(),
        b: "2".into(),
        d: "3".into(),
        f: "4".into(),
    }])
    .description(Banner::new("Quarterly report").with_style(StyleDescriptor::new().bold(true)))
    .main_title(Banner::new("Orders").with_col_span(2).with_height(24.0))
    .start_row_index(1)
    .start_column_index(2);

    assert_eq!(sheet.title_row_index(), 3);
    assert_eq!(sheet.data_row_index(), 5);

    let mut builder = WorkbookBuilder::new();
    builder.add_sheet(&sheet).unwrap();
    let workbook = builder.finish();
    let ws = workbook.worksheet_by_name("Grouped").unwrap();

    assert_eq!(regions(ws), vec!["C2:F2", "C3:D3", "E4:E5", "C4:D4"]);
    assert_eq!(ws.get_value_at(1, 2), CellValue::string("Quarterly report"));
    assert_eq!(ws.get_value_at(2, 2), CellValue::string("Orders"));
    assert_eq!(ws.row_height(2), Some(24.0));
    assert_eq!(ws.get_value_at(4, 3), CellValue::string("C"));
    assert_eq!(ws.get_value_at(5, 5), CellValue::string("4"));
    assert!(ws.get_value_at(0, 0).is_empty());

    let banner_style = workbook.style(ws.cell_style_at(1, 2).unwrap()).unwrap();
    assert!(banner_style.font.bold);
}

#[derive(Debug, Default)]
struct Payment {
    due: Option<NaiveDate>,
    booked: Option<NaiveDateTime>,
    amount: f64,
}

fn payments(rows: Vec<Payment>) -> SheetDescriptor<Payment> {
    SheetDescriptor::new("Payments")
        .column_title_style(StyleDescriptor::new().bold(true).background(Color::LIGHT_GRAY))
        .column(Column::new("Due").getter(|p: &Payment| p.due))
        .column(Column::new("Booked").getter(|p: &Payment| p.booked).width(22.0))
        .column(
            Column::new("Amount")
                .getter(|p: &Payment| Some(p.amount))
                .style(StyleDescriptor::new().number_format("0.00")),
        )
        .column(Column::<Payment, String>::new("Internal").hidden(true))
        .data_rows(rows)
}

#[test]
fn column_settings_and_data_styles() {
    let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let rows = vec![
        Payment {
            due: Some(day),
            booked: day.and_hms_opt(9, 15, 0),
            amount: 12.5,
        },
        Payment {
            due: day.succ_opt(),
            booked: None,
            amount: 3.0,
        },
    ];

    let mut builder = WorkbookBuilder::new();
    builder
        .add_sheet(&payments(rows).default_column_width(11.0).border(true))
        .unwrap();
    let workbook = builder.finish();
    let ws = workbook.worksheet_by_name("Payments").unwrap();
    let format_at = |row: u32, col: u16| {
        let id = ws.cell_style_at(row, col).unwrap();
        workbook.style(id).unwrap().number_format.clone()
    };

    // header
    let header_style = workbook.style(ws.cell_style_at(0, 0).unwrap()).unwrap();
    assert!(header_style.font.bold);
    assert_eq!(header_style.fill, Some(Color::LIGHT_GRAY));
    assert_eq!(ws.cell_style_at(0, 0), ws.cell_style_at(0, 3));

    // temporal values get the built-in formats, shared across rows
    assert_eq!(format_at(1, 0), NumberFormat::from_string(NumberFormat::DATE));
    assert_eq!(format_at(1, 1), NumberFormat::from_string(NumberFormat::DATETIME));
    assert_eq!(ws.cell_style_at(1, 0), ws.cell_style_at(2, 0));
    assert!(ws.get_value_at(2, 1).is_empty());

    // explicit column style wins and becomes the column default
    assert_eq!(format_at(1, 2), NumberFormat::from_string("0.00"));
    assert_eq!(ws.column(2).and_then(|c| c.default_style), ws.cell_style_at(1, 2));
    assert_eq!(ws.effective_style_at(40, 2), ws.cell_style_at(1, 2));

    assert_eq!(ws.column_width(1), 22.0);
    assert_eq!(ws.column_width(0), 11.0);
    assert!(ws.is_column_hidden(3));
    assert!(ws.force_full_calculation());

    let rules = ws.conditional_formats();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].range.to_string(), "A1:D3");
    assert_eq!(rules[0].formula, "TRUE");

    // header, date, datetime, amount
    assert_eq!(workbook.styles().len(), 4);
}

#[test]
fn recalculation_can_be_turned_off() {
    let mut builder = WorkbookBuilder::new();
    builder
        .add_sheet(&payments(Vec::new()).force_formula_recalculation(false))
        .unwrap();
    let workbook = builder.finish();
    let ws = workbook.worksheet(0).unwrap();
    assert!(!ws.force_full_calculation());
    assert!(ws.conditional_formats().is_empty());
}

#[test]
fn configuration_errors_fail_before_layout() {
    let mut builder = WorkbookBuilder::new();

    let ragged = SheetDescriptor::<Cells>::new("Ragged")
        .column(Column::<Cells, String>::new("A#B#C"))
        .column(Column::<Cells, String>::new("D#E"));
    assert!(matches!(
        builder.add_sheet(&ragged),
        Err(Error::InconsistentHeaderRows { .. })
    ));

    let unnamed = SheetDescriptor::<Cells>::new("").column(Column::<Cells, String>::new("A"));
    assert!(matches!(builder.add_sheet(&unnamed), Err(Error::EmptySheetName)));

    assert!(builder.workbook().is_empty());
    assert_eq!(builder.style_cache().created(), 0);
}
