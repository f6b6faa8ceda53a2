//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use gridform_core::Worksheet;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};

/// CSV writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a worksheet to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        worksheet: &Worksheet,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(worksheet, file, options)
    }

    /// Write a worksheet's values to a writer, starting at `A1`
    pub fn write<W: Write>(
        worksheet: &Worksheet,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .from_writer(writer);

        if let Some(range) = worksheet.used_range() {
            for row in 0..=range.end.row {
                let record: Vec<String> = (0..=range.end.col)
                    .map(|col| worksheet.get_value_at(row, col).to_string())
                    .collect();
                csv_writer.write_record(&record)?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Write a worksheet to an in-memory buffer
    pub fn write_to_vec(worksheet: &Worksheet, options: &CsvWriteOptions) -> CsvResult<Vec<u8>> {
        let mut buffer = Vec::new();
        Self::write(worksheet, &mut buffer, options)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CsvReadOptions, CsvReader};
    use gridform_core::CellValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_starts_at_a1() {
        let mut ws = Worksheet::new("S");
        ws.set_cell_value_at(1, 1, "x").unwrap();
        ws.set_cell_value_at(2, 2, 3.5).unwrap();

        let options = CsvWriteOptions {
            line_terminator: LineTerminator::LF,
            ..Default::default()
        };
        let bytes = CsvWriter::write_to_vec(&ws, &options).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), ",,\n,x,\n,,3.5\n");
    }

    #[test]
    fn test_file_round_trip() {
        let mut ws = Worksheet::new("S");
        ws.set_cell_value_at(0, 0, "Name").unwrap();
        ws.set_cell_value_at(1, 0, "has, comma").unwrap();
        ws.set_cell_value_at(1, 1, 12.0).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        CsvWriter::write_file(&ws, &path, &CsvWriteOptions::default()).unwrap();

        let back = CsvReader::read_file(&path, &CsvReadOptions::default()).unwrap();
        assert_eq!(back.get_value_at(1, 0), CellValue::string("has, comma"));
        assert_eq!(back.get_value_at(1, 1), CellValue::Number(12.0));
    }
}
