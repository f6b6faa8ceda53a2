//! Error types for gridform

use thiserror::Error;

use crate::import::ImportErrors;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while laying out, validating or importing sheets
#[derive(Debug, Error)]
pub enum Error {
    /// Two columns of one sheet share a title
    #[error("Sheet '{sheet}': duplicate column title '{title}'")]
    DuplicateColumnTitle { sheet: String, title: String },

    /// A column's header segment count is neither 1 nor the sheet maximum
    #[error(
        "Sheet '{sheet}': column '{title}' has {found} header rows, expected 1 or {expected}"
    )]
    InconsistentHeaderRows {
        sheet: String,
        title: String,
        found: usize,
        expected: usize,
    },

    /// Sheet name is empty or whitespace
    #[error("Sheet name cannot be empty")]
    EmptySheetName,

    /// Sheet name already used in the document
    #[error("Sheet name already exists in document: {0}")]
    DuplicateSheetName(String),

    /// Document format not recognized
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// Sheet missing from an uploaded document
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Uploaded header row does not match the expected titles
    #[error(
        "Template mismatch in sheet '{sheet}': column {column} should be titled '{expected}', found '{found}'"
    )]
    TemplateMismatch {
        sheet: String,
        column: String,
        expected: String,
        found: String,
    },

    /// One or more rows failed validation; nothing was imported
    #[error("{0}")]
    RowValidation(ImportErrors),

    /// Bytes could not be decoded into a document
    #[error("Unreadable document: {0}")]
    UnreadableDocument(String),

    /// Document could not be encoded
    #[error("Failed to encode document: {0}")]
    Encode(String),

    /// Error raised by the grid
    #[error(transparent)]
    Grid(#[from] gridform_core::Error),
}
