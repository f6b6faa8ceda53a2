//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use gridform_core::cell::{DATETIME_DISPLAY_FORMAT, DATE_DISPLAY_FORMAT};
use gridform_core::{CellValue, Worksheet, MAX_COLS, MAX_ROWS};
use log::debug;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;

/// CSV reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a worksheet
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into a worksheet
    ///
    /// Record `n` lands on row `n`; blank fields leave their cell empty.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut worksheet = Worksheet::new(options.sheet_name.as_str());

        for (row_idx, result) in csv_reader.records().enumerate() {
            let record = result?;
            let row = u32::try_from(row_idx)
                .ok()
                .filter(|r| *r < MAX_ROWS)
                .ok_or_else(|| CsvError::TooLarge {
                    row: row_idx,
                    message: format!("more than {MAX_ROWS} rows"),
                })?;
            if record.len() > usize::from(MAX_COLS) {
                return Err(CsvError::TooLarge {
                    row: row_idx,
                    message: format!("{} fields (max {MAX_COLS})", record.len()),
                });
            }

            let detect = options.auto_detect_types && !(options.has_header && row_idx == 0);
            for (col, field) in record.iter().enumerate() {
                let value = if detect {
                    detect_type(field)
                } else if field.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::string(field)
                };
                // bounded by the MAX_COLS check above
                worksheet.set_cell_value_at(row, col as u16, value)?;
            }
        }

        debug!(
            "read {} cells into sheet '{}'",
            worksheet.cell_count(),
            worksheet.name()
        );
        Ok(worksheet)
    }
}

/// Detect the type of a field value.
///
/// Only renderings the writer itself produces are recognized, so text such
/// as `007` or `1e3` stays text.
fn detect_type(field: &str) -> CellValue {
    if field.trim().is_empty() {
        return CellValue::Empty;
    }

    match field {
        "TRUE" => return CellValue::Boolean(true),
        "FALSE" => return CellValue::Boolean(false),
        _ => {}
    }

    if field.len() > 1 && field.starts_with('=') {
        return CellValue::Formula(field.to_string());
    }

    if let Ok(n) = field.parse::<f64>() {
        if n.is_finite() && n.to_string() == field {
            return CellValue::Number(n);
        }
    }

    // Midnight is always written in the short date form
    if let Ok(dt) = NaiveDateTime::parse_from_str(field, DATETIME_DISPLAY_FORMAT) {
        if dt.time() != NaiveTime::MIN {
            return CellValue::Date(dt);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(field, DATE_DISPLAY_FORMAT) {
        return CellValue::from(d);
    }

    CellValue::string(field)
}
