//! Encoding documents to bytes and decoding them back
//!
//! CSV carries the values of a single sheet. JSON is a full snapshot of a
//! workbook: values, styles, merges and column settings.

use std::path::Path;

use gridform_core::Workbook;
use gridform_csv::{CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};

use crate::error::{Error, Result};

/// Byte format of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Comma separated values, one sheet
    Csv,
    /// JSON snapshot of the whole workbook
    Json,
}

impl DocumentFormat {
    /// Pick the format from a file extension (case-insensitive)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(DocumentFormat::Csv),
            Some("json") => Ok(DocumentFormat::Json),
            Some(other) => Err(Error::UnsupportedFormat(format!(".{other}"))),
            None => Err(Error::UnsupportedFormat(format!(
                "no file extension in {}",
                path.display()
            ))),
        }
    }

    /// Usual file extension
    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Csv => "csv",
            DocumentFormat::Json => "json",
        }
    }

    /// Encode a workbook; CSV writes its first sheet
    pub fn encode(self, workbook: &Workbook) -> Result<Vec<u8>> {
        match self {
            DocumentFormat::Csv => match workbook.worksheet(0) {
                Some(sheet) => write_csv(workbook, sheet.name(), &CsvWriteOptions::default()),
                None => Ok(Vec::new()),
            },
            DocumentFormat::Json => write_json(workbook),
        }
    }

    /// Decode bytes; a CSV document becomes one sheet named `Sheet1`
    pub fn decode(self, bytes: &[u8]) -> Result<Workbook> {
        match self {
            DocumentFormat::Csv => read_csv(bytes, &CsvReadOptions::default()),
            DocumentFormat::Json => read_json(bytes),
        }
    }
}

/// Write one sheet's values as CSV
pub fn write_csv(workbook: &Workbook, sheet_name: &str, options: &CsvWriteOptions) -> Result<Vec<u8>> {
    let sheet = workbook
        .worksheet_by_name(sheet_name)
        .ok_or_else(|| Error::SheetNotFound(sheet_name.to_string()))?;
    CsvWriter::write_to_vec(sheet, options).map_err(|e| Error::Encode(e.to_string()))
}

/// Read CSV into a workbook with one sheet named by `options`
pub fn read_csv(bytes: &[u8], options: &CsvReadOptions) -> Result<Workbook> {
    let sheet = CsvReader::read(bytes, options).map_err(|e| Error::UnreadableDocument(e.to_string()))?;
    let mut workbook = Workbook::new();
    workbook.add_existing_worksheet(sheet)?;
    Ok(workbook)
}

/// Serialize a workbook snapshot
pub fn write_json(workbook: &Workbook) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(workbook).map_err(|e| Error::Encode(e.to_string()))
}

/// Restore a workbook snapshot
pub fn read_json(bytes: &[u8]) -> Result<Workbook> {
    let mut workbook: Workbook =
        serde_json::from_slice(bytes).map_err(|e| Error::UnreadableDocument(e.to_string()))?;
    workbook.styles_mut().reindex();
    Ok(workbook)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridform_core::style::Style;
    use gridform_core::{CellRange, CellValue, Worksheet};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_from_path() {
        assert_eq!(DocumentFormat::from_path("a/b.CSV").unwrap(), DocumentFormat::Csv);
        assert_eq!(DocumentFormat::from_path("x.json").unwrap(), DocumentFormat::Json);
        assert!(matches!(
            DocumentFormat::from_path("x.xlsx"),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(DocumentFormat::from_path("noext").is_err());
    }

    #[test]
    fn test_json_snapshot_keeps_layout() {
        let mut workbook = Workbook::new();
        let bold = workbook.styles_mut().push(Style::new().bold(true));
        let mut sheet = Worksheet::new("S");
        sheet.set_cell_value_at(0, 0, "Title").unwrap();
        sheet.set_cell_style_at(0, 0, Some(bold)).unwrap();
        sheet.merge_cells(&CellRange::parse("A1:C1").unwrap()).unwrap();
        sheet.set_column_width(1, 20.0);
        workbook.add_existing_worksheet(sheet).unwrap();

        let bytes = DocumentFormat::Json.encode(&workbook).unwrap();
        let mut back = DocumentFormat::Json.decode(&bytes).unwrap();

        let sheet = back.worksheet_by_name("S").unwrap();
        assert_eq!(sheet.get_value_at(0, 0), CellValue::string("Title"));
        assert_eq!(sheet.cell_style_at(0, 0), Some(bold));
        assert_eq!(sheet.merged_regions(), [CellRange::parse("A1:C1").unwrap()]);
        assert_eq!(sheet.column_width(1), 20.0);
        assert_eq!(back.styles_mut().intern(Style::new().bold(true)), bold);
    }

    #[test]
    fn test_garbage_is_unreadable() {
        assert!(matches!(
            DocumentFormat::Json.decode(b"{not json"),
            Err(Error::UnreadableDocument(_))
        ));
    }

    #[test]
    fn test_csv_named_sheet() {
        let workbook = read_csv(b"a,b\n1,2\n", &CsvReadOptions::default().with_sheet_name("Up")).unwrap();
        let sheet = workbook.worksheet_by_name("Up").unwrap();
        assert_eq!(sheet.get_value_at(1, 1), CellValue::Number(2.0));

        let bytes = write_csv(&workbook, "Up", &CsvWriteOptions::default()).unwrap();
        assert_eq!(bytes, b"a,b\r\n1,2\r\n");
    }
}
