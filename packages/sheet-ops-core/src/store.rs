//! In-memory workbook store.
//!
//! Owns every spreadsheet served by the runtime. The store is the
//! grid-service side of the engine's collaborator boundary: structural
//! mutations arrive one at a time and either commit fully or fail with
//! a specific reason.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::SheetError;
use crate::grid::{CellValue, GridState, SheetGrid};
use crate::ops::{DimensionOperation, OperationKind};
use crate::range::CellRange;

/// Spreadsheet identity, as echoed in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SpreadsheetMeta {
    pub id: String,
    pub title: String,
}

/// Sheet identity and current size.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetMeta {
    pub id: u64,
    pub title: String,
    pub row_count: u32,
    pub column_count: u32,
}

/// One sheet: a titled grid.
#[derive(Debug, Clone)]
struct Sheet {
    id: u64,
    title: String,
    grid: SheetGrid,
}

impl Sheet {
    fn meta(&self) -> SheetMeta {
        SheetMeta {
            id: self.id,
            title: self.title.clone(),
            row_count: self.grid.row_count(),
            column_count: self.grid.column_count(),
        }
    }
}

/// One spreadsheet: an ordered collection of sheets.
#[derive(Debug, Clone)]
struct Spreadsheet {
    id: String,
    title: String,
    sheets: Vec<Sheet>,
}

impl Spreadsheet {
    fn meta(&self) -> SpreadsheetMeta {
        SpreadsheetMeta {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }

    fn sheet(&self, sheet_id: u64) -> Result<&Sheet, SheetError> {
        self.sheets
            .iter()
            .find(|s| s.id == sheet_id)
            .ok_or_else(|| SheetError::SheetNotFound {
                spreadsheet_id: self.id.clone(),
                sheet_id,
            })
    }

    fn sheet_mut(&mut self, sheet_id: u64) -> Result<&mut Sheet, SheetError> {
        let id = self.id.clone();
        self.sheets
            .iter_mut()
            .find(|s| s.id == sheet_id)
            .ok_or(SheetError::SheetNotFound {
                spreadsheet_id: id,
                sheet_id,
            })
    }

    fn ensure_title_free(&self, title: &str) -> Result<(), SheetError> {
        if self.sheets.iter().any(|s| s.title == title) {
            return Err(SheetError::SheetAlreadyExists {
                spreadsheet_id: self.id.clone(),
                title: title.to_string(),
            });
        }
        Ok(())
    }
}

/// In-memory store of spreadsheets.
#[derive(Debug, Default)]
pub struct WorkbookStore {
    spreadsheets: HashMap<String, Spreadsheet>,
    next_spreadsheet: u64,
    next_sheet_id: u64,
}

impl WorkbookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a spreadsheet with a single default sheet.
    pub fn create_spreadsheet(
        &mut self,
        title: String,
        rows: u32,
        columns: u32,
    ) -> SpreadsheetMeta {
        self.next_spreadsheet += 1;
        let id = format!("ss-{}", self.next_spreadsheet);
        let sheet = Sheet {
            id: self.allocate_sheet_id(),
            title: "Sheet1".to_string(),
            grid: SheetGrid::new(rows, columns),
        };
        let spreadsheet = Spreadsheet {
            id: id.clone(),
            title,
            sheets: vec![sheet],
        };
        let meta = spreadsheet.meta();
        self.spreadsheets.insert(id, spreadsheet);
        debug!(spreadsheet = %meta.id, "created spreadsheet");
        meta
    }

    pub fn list_spreadsheets(&self) -> Vec<SpreadsheetMeta> {
        let mut metas: Vec<SpreadsheetMeta> =
            self.spreadsheets.values().map(Spreadsheet::meta).collect();
        metas.sort_by(|a, b| a.id.cmp(&b.id));
        metas
    }

    pub fn add_sheet(
        &mut self,
        spreadsheet_id: &str,
        title: String,
        rows: u32,
        columns: u32,
    ) -> Result<SheetMeta, SheetError> {
        let sheet_id = self.allocate_sheet_id();
        let spreadsheet = self.spreadsheet_mut(spreadsheet_id)?;
        spreadsheet.ensure_title_free(&title)?;
        let sheet = Sheet {
            id: sheet_id,
            title,
            grid: SheetGrid::new(rows, columns),
        };
        let meta = sheet.meta();
        spreadsheet.sheets.push(sheet);
        Ok(meta)
    }

    /// Deletes a sheet. Removing the last remaining sheet is rejected.
    pub fn delete_sheet(&mut self, spreadsheet_id: &str, sheet_id: u64) -> Result<(), SheetError> {
        let spreadsheet = self.spreadsheet_mut(spreadsheet_id)?;
        let position = spreadsheet
            .sheets
            .iter()
            .position(|s| s.id == sheet_id)
            .ok_or_else(|| SheetError::SheetNotFound {
                spreadsheet_id: spreadsheet_id.to_string(),
                sheet_id,
            })?;
        if spreadsheet.sheets.len() == 1 {
            return Err(SheetError::CannotDeleteLastSheet {
                spreadsheet_id: spreadsheet_id.to_string(),
            });
        }
        spreadsheet.sheets.remove(position);
        Ok(())
    }

    /// Copies a sheet, cells included, under a new title.
    pub fn copy_sheet(
        &mut self,
        spreadsheet_id: &str,
        sheet_id: u64,
        new_title: String,
    ) -> Result<SheetMeta, SheetError> {
        let new_id = self.allocate_sheet_id();
        let spreadsheet = self.spreadsheet_mut(spreadsheet_id)?;
        spreadsheet.ensure_title_free(&new_title)?;
        let source = spreadsheet.sheet(sheet_id)?;
        let copy = Sheet {
            id: new_id,
            title: new_title,
            grid: source.grid.clone(),
        };
        let meta = copy.meta();
        spreadsheet.sheets.push(copy);
        Ok(meta)
    }

    pub fn rename_sheet(
        &mut self,
        spreadsheet_id: &str,
        sheet_id: u64,
        title: String,
    ) -> Result<SheetMeta, SheetError> {
        let spreadsheet = self.spreadsheet_mut(spreadsheet_id)?;
        spreadsheet.ensure_title_free(&title)?;
        let sheet = spreadsheet.sheet_mut(sheet_id)?;
        sheet.title = title;
        Ok(sheet.meta())
    }

    pub fn list_sheets(&self, spreadsheet_id: &str) -> Result<Vec<SheetMeta>, SheetError> {
        let spreadsheet = self.spreadsheet(spreadsheet_id)?;
        Ok(spreadsheet.sheets.iter().map(Sheet::meta).collect())
    }

    /// Spreadsheet and sheet identity in one lookup.
    pub fn sheet_meta(
        &self,
        spreadsheet_id: &str,
        sheet_id: u64,
    ) -> Result<(SpreadsheetMeta, SheetMeta), SheetError> {
        let spreadsheet = self.spreadsheet(spreadsheet_id)?;
        let sheet = spreadsheet.sheet(sheet_id)?;
        Ok((spreadsheet.meta(), sheet.meta()))
    }

    /// Current grid size, read once per batch by the engine.
    pub fn grid_size(&self, spreadsheet_id: &str, sheet_id: u64) -> Result<GridState, SheetError> {
        let spreadsheet = self.spreadsheet(spreadsheet_id)?;
        Ok(spreadsheet.sheet(sheet_id)?.grid.state())
    }

    /// Applies exactly one structural mutation.
    ///
    /// Returns the number of units changed. The mutation either commits
    /// fully or leaves the grid untouched.
    pub fn apply_dimension(
        &mut self,
        spreadsheet_id: &str,
        sheet_id: u64,
        op: &DimensionOperation,
    ) -> Result<u32, SheetError> {
        let spreadsheet = self.spreadsheet_mut(spreadsheet_id)?;
        let sheet = spreadsheet.sheet_mut(sheet_id)?;
        match op.kind {
            OperationKind::Insert {
                start_index,
                end_index,
                ..
            } => sheet.grid.insert(op.dimension, start_index, end_index)?,
            OperationKind::Delete {
                start_index,
                end_index,
            } => sheet.grid.delete(op.dimension, start_index, end_index)?,
            OperationKind::Append => sheet.grid.append(op.dimension)?,
        }
        debug!(
            spreadsheet = spreadsheet_id,
            sheet = sheet_id,
            operation = op.kind_name(),
            dimension = %op.dimension,
            "applied dimension mutation"
        );
        Ok(op.affected_count())
    }

    /// Reads a rectangular range, padding unpopulated cells with
    /// `CellValue::Empty`.
    pub fn read_range(
        &self,
        spreadsheet_id: &str,
        sheet_id: u64,
        range: &CellRange,
    ) -> Result<Vec<Vec<CellValue>>, SheetError> {
        let spreadsheet = self.spreadsheet(spreadsheet_id)?;
        let sheet = spreadsheet.sheet(sheet_id)?;
        check_range_bounds(&sheet.grid.state(), range)?;

        let mut rows = Vec::with_capacity(range.row_span() as usize);
        for row in range.start_row..=range.end_row {
            let mut values = Vec::with_capacity(range.column_span() as usize);
            for column in range.start_column..=range.end_column {
                values.push(sheet.grid.get(row, column).cloned().unwrap_or_default());
            }
            rows.push(values);
        }
        Ok(rows)
    }

    /// Writes a rectangle of values anchored at the range's start corner.
    ///
    /// Each value row must fit the range's column span; short batches of
    /// rows are allowed, oversized ones are a shape mismatch. Returns the
    /// number of cells written.
    pub fn write_range(
        &mut self,
        spreadsheet_id: &str,
        sheet_id: u64,
        range: &CellRange,
        values: Vec<Vec<CellValue>>,
    ) -> Result<usize, SheetError> {
        let spreadsheet = self.spreadsheet_mut(spreadsheet_id)?;
        let sheet = spreadsheet.sheet_mut(sheet_id)?;
        check_range_bounds(&sheet.grid.state(), range)?;
        if values.len() > range.row_span() as usize {
            return Err(SheetError::ValueShapeMismatch {
                expected: range.row_span() as usize,
                got: values.len(),
            });
        }

        let mut written = 0;
        for (row_offset, row_values) in values.into_iter().enumerate() {
            if row_values.len() > range.column_span() as usize {
                return Err(SheetError::ValueShapeMismatch {
                    expected: range.column_span() as usize,
                    got: row_values.len(),
                });
            }
            for (column_offset, value) in row_values.into_iter().enumerate() {
                sheet.grid.set(
                    range.start_row + row_offset as u32,
                    range.start_column + column_offset as u32,
                    value,
                );
                written += 1;
            }
        }
        Ok(written)
    }

    fn spreadsheet(&self, id: &str) -> Result<&Spreadsheet, SheetError> {
        self.spreadsheets
            .get(id)
            .ok_or_else(|| SheetError::SpreadsheetNotFound { id: id.to_string() })
    }

    fn spreadsheet_mut(&mut self, id: &str) -> Result<&mut Spreadsheet, SheetError> {
        self.spreadsheets
            .get_mut(id)
            .ok_or_else(|| SheetError::SpreadsheetNotFound { id: id.to_string() })
    }

    fn allocate_sheet_id(&mut self) -> u64 {
        let id = self.next_sheet_id;
        self.next_sheet_id += 1;
        id
    }
}

fn check_range_bounds(state: &GridState, range: &CellRange) -> Result<(), SheetError> {
    if range.end_row >= state.row_count || range.end_column >= state.column_count {
        return Err(SheetError::InvalidRange {
            range: range.to_string(),
            reason: format!(
                "exceeds grid size {}x{}",
                state.row_count, state.column_count
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Dimension;

    fn store_with_sheet() -> (WorkbookStore, String, u64) {
        let mut store = WorkbookStore::new();
        let spreadsheet = store.create_spreadsheet("Budget".to_string(), 100, 10);
        let sheets = store.list_sheets(&spreadsheet.id).unwrap();
        let sheet_id = sheets[0].id;
        (store, spreadsheet.id, sheet_id)
    }

    #[test]
    fn create_spreadsheet_has_default_sheet() {
        let (store, id, _) = store_with_sheet();
        let sheets = store.list_sheets(&id).unwrap();
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].title, "Sheet1");
        assert_eq!(sheets[0].row_count, 100);
    }

    #[test]
    fn add_sheet_rejects_duplicate_title() {
        let (mut store, id, _) = store_with_sheet();
        store.add_sheet(&id, "Data".to_string(), 10, 5).unwrap();
        let err = store.add_sheet(&id, "Data".to_string(), 10, 5).unwrap_err();
        assert!(matches!(err, SheetError::SheetAlreadyExists { .. }));
    }

    #[test]
    fn copy_sheet_clones_cells() {
        let (mut store, id, sheet_id) = store_with_sheet();
        let range = CellRange::parse("A1").unwrap();
        store
            .write_range(&id, sheet_id, &range, vec![vec![CellValue::Number(7.0)]])
            .unwrap();
        let copy = store.copy_sheet(&id, sheet_id, "Copy".to_string()).unwrap();
        let values = store.read_range(&id, copy.id, &range).unwrap();
        assert_eq!(values[0][0], CellValue::Number(7.0));
    }

    #[test]
    fn rename_sheet_updates_meta() {
        let (mut store, id, sheet_id) = store_with_sheet();
        let meta = store
            .rename_sheet(&id, sheet_id, "Renamed".to_string())
            .unwrap();
        assert_eq!(meta.title, "Renamed");
    }

    #[test]
    fn delete_missing_sheet_errors() {
        let (mut store, id, _) = store_with_sheet();
        let err = store.delete_sheet(&id, 999).unwrap_err();
        assert!(matches!(err, SheetError::SheetNotFound { .. }));
    }

    #[test]
    fn delete_last_sheet_is_rejected() {
        let (mut store, id, sheet_id) = store_with_sheet();
        let err = store.delete_sheet(&id, sheet_id).unwrap_err();
        assert!(matches!(err, SheetError::CannotDeleteLastSheet { .. }));
        assert_eq!(store.list_sheets(&id).unwrap().len(), 1);

        store.add_sheet(&id, "Data".to_string(), 10, 5).unwrap();
        store.delete_sheet(&id, sheet_id).unwrap();
        assert_eq!(store.list_sheets(&id).unwrap().len(), 1);
    }

    #[test]
    fn apply_dimension_adjusts_size() {
        let (mut store, id, sheet_id) = store_with_sheet();
        let op = DimensionOperation {
            dimension: Dimension::Rows,
            kind: OperationKind::Delete {
                start_index: 10,
                end_index: 20,
            },
        };
        let affected = store.apply_dimension(&id, sheet_id, &op).unwrap();
        assert_eq!(affected, 10);
        let state = store.grid_size(&id, sheet_id).unwrap();
        assert_eq!(state.row_count, 90);
    }

    #[test]
    fn read_range_pads_empty_cells() {
        let (mut store, id, sheet_id) = store_with_sheet();
        let anchor = CellRange::parse("A1").unwrap();
        store
            .write_range(&id, sheet_id, &anchor, vec![vec![CellValue::Text("hi".into())]])
            .unwrap();
        let range = CellRange::parse("A1:B2").unwrap();
        let values = store.read_range(&id, sheet_id, &range).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0][0], CellValue::Text("hi".to_string()));
        assert_eq!(values[1][1], CellValue::Empty);
    }

    #[test]
    fn write_range_rejects_oversized_rows() {
        let (mut store, id, sheet_id) = store_with_sheet();
        let range = CellRange::parse("A1:A2").unwrap();
        let err = store
            .write_range(
                &id,
                sheet_id,
                &range,
                vec![vec![CellValue::Number(1.0), CellValue::Number(2.0)]],
            )
            .unwrap_err();
        assert!(matches!(err, SheetError::ValueShapeMismatch { .. }));
    }

    #[test]
    fn read_range_outside_grid_errors() {
        let (store, id, sheet_id) = store_with_sheet();
        let range = CellRange::parse("A1:Z200").unwrap();
        let err = store.read_range(&id, sheet_id, &range).unwrap_err();
        assert!(matches!(err, SheetError::InvalidRange { .. }));
    }
}
