//! Store error types.

use thiserror::Error;

use crate::grid::Dimension;

/// Workbook store operation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SheetError {
    /// Spreadsheet not found
    #[error("Spreadsheet '{id}' not found")]
    SpreadsheetNotFound { id: String },

    /// Sheet not found in spreadsheet
    #[error("Sheet {sheet_id} not found in spreadsheet '{spreadsheet_id}'")]
    SheetNotFound {
        spreadsheet_id: String,
        sheet_id: u64,
    },

    /// Sheet title already taken within the spreadsheet
    #[error("Sheet '{title}' already exists in spreadsheet '{spreadsheet_id}'")]
    SheetAlreadyExists {
        spreadsheet_id: String,
        title: String,
    },

    /// Dimension range falls outside the current grid
    #[error("{dimension} range [{start}, {end}) is out of range for size {size}")]
    IndexOutOfRange {
        dimension: Dimension,
        start: u32,
        end: u32,
        size: u32,
    },

    /// A sheet must keep at least one row and one column
    #[error("Cannot delete every remaining {dimension} of the sheet")]
    CannotDeleteAll { dimension: Dimension },

    /// A spreadsheet must keep at least one sheet
    #[error("Cannot delete the last remaining sheet of spreadsheet '{spreadsheet_id}'")]
    CannotDeleteLastSheet { spreadsheet_id: String },

    /// Malformed A1 range notation
    #[error("Invalid range '{range}': {reason}")]
    InvalidRange { range: String, reason: String },

    /// Written values do not fit the addressed range
    #[error("Value shape mismatch: range covers {expected} cells per row, got {got}")]
    ValueShapeMismatch { expected: usize, got: usize },

    /// Grid size arithmetic overflow
    #[error("Grid size overflow during {operation}")]
    SizeOverflow { operation: &'static str },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Command channel to the runtime closed
    #[error("Grid service unavailable: {0}")]
    ServiceUnavailable(String),
}
