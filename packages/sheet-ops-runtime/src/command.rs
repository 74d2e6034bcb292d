//! Command messages accepted by the runtime loop.

use sheet_ops_core::grid::CellValue;
use sheet_ops_core::ops::DimensionOperation;
use sheet_ops_core::range::CellRange;

use crate::ResponseSender;

/// A single request against the workbook store.
///
/// Thin operations map one-to-one onto store calls; the engine issues
/// one `GridSize` per batch and one `MutateDimension` per scheduled
/// operation.
#[derive(Debug)]
pub enum SheetCommand {
    /// Create a spreadsheet with one default sheet
    CreateSpreadsheet {
        title: String,
        response: ResponseSender,
    },
    /// List all spreadsheets
    ListSpreadsheets { response: ResponseSender },
    /// Add a sheet to a spreadsheet
    AddSheet {
        spreadsheet_id: String,
        title: String,
        rows: Option<u32>,
        columns: Option<u32>,
        response: ResponseSender,
    },
    /// Delete a sheet
    DeleteSheet {
        spreadsheet_id: String,
        sheet_id: u64,
        response: ResponseSender,
    },
    /// Copy a sheet, cells included, under a new title
    CopySheet {
        spreadsheet_id: String,
        sheet_id: u64,
        new_title: String,
        response: ResponseSender,
    },
    /// Rename a sheet
    RenameSheet {
        spreadsheet_id: String,
        sheet_id: u64,
        title: String,
        response: ResponseSender,
    },
    /// List sheets with their sizes
    ListSheets {
        spreadsheet_id: String,
        response: ResponseSender,
    },
    /// Spreadsheet and sheet identity in one lookup
    SheetMeta {
        spreadsheet_id: String,
        sheet_id: u64,
        response: ResponseSender,
    },
    /// Current grid size
    GridSize {
        spreadsheet_id: String,
        sheet_id: u64,
        response: ResponseSender,
    },
    /// Apply exactly one structural mutation
    MutateDimension {
        spreadsheet_id: String,
        sheet_id: u64,
        op: DimensionOperation,
        response: ResponseSender,
    },
    /// Read a rectangular range of values
    ReadRange {
        spreadsheet_id: String,
        sheet_id: u64,
        range: CellRange,
        response: ResponseSender,
    },
    /// Write a rectangle of values anchored at the range start
    WriteRange {
        spreadsheet_id: String,
        sheet_id: u64,
        range: CellRange,
        values: Vec<Vec<CellValue>>,
        response: ResponseSender,
    },
}
