//! Export then import with the same description

use chrono::{NaiveDate, NaiveDateTime};
use gridform::codec::{read_csv, write_csv};
use gridform::prelude::*;
use gridform_csv::{CsvReadOptions, CsvWriteOptions};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Default, PartialEq)]
struct Order {
    id: i64,
    customer: String,
    quantity: u32,
    price: Decimal,
    paid: bool,
    placed_on: Option<NaiveDate>,
    shipped_at: Option<NaiveDateTime>,
    note: Option<String>,
    weight: f64,
}

fn orders(rows: Vec<Order>) -> SheetDescriptor<Order> {
    SheetDescriptor::new("Orders")
        .description(Banner::new("Orders export").with_style(StyleDescriptor::new().wrap(true)))
        .column_title_style(StyleDescriptor::new().bold(true))
        .column(
            Column::new("Order#Id")
                .getter(|o: &Order| Some(o.id))
                .setter(|o: &mut Order, v: Option<i64>| o.id = v.unwrap_or_default())
                .required(true)
                .unique_key(true),
        )
        .column(
            Column::new("Order#Customer")
                .getter(|o: &Order| Some(o.customer.clone()))
                .setter(|o: &mut Order, v: Option<String>| o.customer = v.unwrap_or_default())
                .required(true),
        )
        .column(
            Column::new("Quantity")
                .getter(|o: &Order| Some(o.quantity))
                .setter(|o: &mut Order, v: Option<u32>| o.quantity = v.unwrap_or_default())
                .min(1),
        )
        .column(
            Column::new("Price")
                .getter(|o: &Order| Some(o.price))
                .setter(|o: &mut Order, v: Option<Decimal>| o.price = v.unwrap_or_default())
                .style(StyleDescriptor::new().number_format("#,##0.00")),
        )
        .column(
            Column::new("Paid")
                .getter(|o: &Order| Some(o.paid))
                .setter(|o: &mut Order, v: Option<bool>| o.paid = v.unwrap_or_default()),
        )
        .column(
            Column::new("Dates#Placed")
                .getter(|o: &Order| o.placed_on)
                .setter(|o: &mut Order, v| o.placed_on = v),
        )
        .column(
            Column::new("Dates#Shipped")
                .getter(|o: &Order| o.shipped_at)
                .setter(|o: &mut Order, v| o.shipped_at = v),
        )
        .column(
            Column::new("Note")
                .getter(|o: &Order| o.note.clone())
                .setter(|o: &mut Order, v| o.note = v)
                .width(30.0),
        )
        .column(
            Column::new("Weight")
                .getter(|o: &Order| Some(o.weight))
                .setter(|o: &mut Order, v: Option<f64>| o.weight = v.unwrap_or_default()),
        )
        .data_rows(rows)
}

fn sample() -> Vec<Order> {
    let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    vec![
        Order {
            id: 1001,
            customer: "Ada Lovelace".into(),
            quantity: 3,
            price: "19.99".parse().unwrap(),
            paid: true,
            placed_on: Some(day),
            shipped_at: day.succ_opt().and_then(|d| d.and_hms_opt(9, 30, 0)),
            note: Some("leave at door, ring twice".into()),
            weight: 2.5,
        },
        Order {
            id: 1002,
            customer: "4711".into(),
            quantity: 12,
            price: "0.10".parse().unwrap(),
            paid: false,
            placed_on: None,
            shipped_at: None,
            note: None,
            weight: 0.0,
        },
        Order {
            id: 1003,
            customer: "Grace \"Amazing\" Hopper".into(),
            quantity: 1,
            price: Decimal::new(125_000, 2),
            paid: true,
            placed_on: Some(day),
            shipped_at: None,
            note: Some("007".into()),
            weight: 1234.75,
        },
        // Values that only survive when written as text
        Order {
            id: 9_007_199_254_740_993,
            customer: "2024-01-01 00:00:00".into(),
            quantity: 5,
            price: "12345678901234567.89".parse().unwrap(),
            paid: false,
            placed_on: None,
            shipped_at: None,
            note: Some("=total".into()),
            weight: -0.5,
        },
    ]
}

fn export(rows: Vec<Order>) -> Workbook {
    let mut builder = WorkbookBuilder::new();
    builder.add_sheet(&orders(rows)).unwrap();
    builder.finish()
}

#[test]
fn in_memory_round_trip() {
    let workbook = export(sample());
    let back = read_sheet(&workbook, &orders(Vec::new())).unwrap();
    assert_eq!(back, sample());
}

#[test]
fn csv_round_trip() {
    let workbook = export(sample());
    let bytes = write_csv(&workbook, "Orders", &CsvWriteOptions::default()).unwrap();

    let uploaded = read_csv(&bytes, &CsvReadOptions::default().with_sheet_name("Orders")).unwrap();
    let back = read_sheet(&uploaded, &orders(Vec::new())).unwrap();
    assert_eq!(back, sample());
}

#[test]
fn json_round_trip_keeps_layout() {
    let workbook = export(sample());
    let bytes = DocumentFormat::Json.encode(&workbook).unwrap();
    let uploaded = DocumentFormat::Json.decode(&bytes).unwrap();

    let back = read_sheet(&uploaded, &orders(Vec::new())).unwrap();
    assert_eq!(back, sample());

    let before = workbook.worksheet(0).unwrap();
    let after = uploaded.worksheet(0).unwrap();
    assert_eq!(before.merged_regions(), after.merged_regions());
    assert_eq!(after.column_width(7), 30.0);
    assert_eq!(uploaded.styles().len(), workbook.styles().len());
}

#[test]
fn offset_sheet_round_trip() {
    let mut builder = WorkbookBuilder::new();
    builder
        .add_sheet(&orders(sample()).start_row_index(4).start_column_index(3))
        .unwrap();
    let workbook = builder.finish();

    let back = read_sheet(
        &workbook,
        &orders(Vec::new()).start_row_index(4).start_column_index(3),
    )
    .unwrap();
    assert_eq!(back, sample());
}

#[test]
fn empty_export_imports_nothing() {
    let workbook = export(Vec::new());
    let back = read_sheet(&workbook, &orders(Vec::new())).unwrap();
    assert!(back.is_empty());
}
