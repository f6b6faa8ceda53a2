//! # gridform
//!
//! Declarative spreadsheet layout and typed import.
//!
//! Describe a sheet once with [`SheetDescriptor`] and [`Column`]s, then use
//! it both ways:
//!
//! - export: [`WorkbookBuilder::add_sheet`] writes banners, multi-row
//!   headers with automatic merges, styled columns and one row per record
//! - import: [`read_sheet`] checks the uploaded headers and converts every
//!   data row back into a record, rejecting the whole batch if any row is
//!   invalid
//!
//! ## Example
//!
//! ```rust
//! use gridform::prelude::*;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: Option<u32>,
//! }
//!
//! fn people(rows: Vec<Person>) -> SheetDescriptor<Person> {
//!     SheetDescriptor::new("People")
//!         .column(
//!             Column::new("Person#Name")
//!                 .getter(|p: &Person| Some(p.name.clone()))
//!                 .setter(|p: &mut Person, v: Option<String>| p.name = v.unwrap_or_default())
//!                 .required(true)
//!                 .unique_key(true),
//!         )
//!         .column(
//!             Column::new("Person#Age")
//!                 .getter(|p: &Person| p.age)
//!                 .setter(|p: &mut Person, v| p.age = v)
//!                 .max(150),
//!         )
//!         .data_rows(rows)
//! }
//!
//! let mut builder = WorkbookBuilder::new();
//! builder
//!     .add_sheet(&people(vec![Person { name: "Ada".into(), age: Some(36) }]))
//!     .unwrap();
//! let workbook = builder.finish();
//!
//! let back = read_sheet(&workbook, &people(Vec::new())).unwrap();
//! assert_eq!(back, vec![Person { name: "Ada".into(), age: Some(36) }]);
//! ```

pub mod codec;
pub mod column;
pub mod document;
pub mod error;
pub mod grid;
pub mod import;
pub mod layout;
pub mod prelude;
pub mod sheet;
pub mod style;
pub mod style_cache;
pub mod template;
pub mod value;

pub use codec::DocumentFormat;
pub use column::{CellOutcome, Column, ColumnDescriptor, TITLE_SEPARATOR};
pub use document::{read_sheet, WorkbookBuilder};
pub use error::{Error, Result};
pub use grid::Grid;
pub use import::{import_rows, ImportErrors};
pub use layout::{plan_header_merges, write_sheet};
pub use sheet::{Banner, SheetDescriptor};
pub use style::StyleDescriptor;
pub use style_cache::StyleCache;
pub use template::{check_headers, validate_template};
pub use value::CellType;
