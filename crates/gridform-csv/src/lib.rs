//! # gridform-csv
//!
//! CSV reader and writer for gridform worksheets.
//!
//! CSV carries cell values only. Cells keep their absolute positions: the
//! writer always starts at `A1`, so a sheet whose data begins at an offset
//! reads back with the same row and column indices.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
