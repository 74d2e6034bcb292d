//! Grid primitives: dimensions, sizes, cell values, and the sparse
//! cell grid with structural mutation support.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SheetError;

/// One of the two axes of a tabular grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "ROWS")]
    Rows,
    #[serde(rename = "COLUMNS")]
    Columns,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Rows => write!(f, "ROWS"),
            Dimension::Columns => write!(f, "COLUMNS"),
        }
    }
}

/// A snapshot of a grid's size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridState {
    /// Number of rows
    pub row_count: u32,
    /// Number of columns
    pub column_count: u32,
}

impl GridState {
    pub fn new(row_count: u32, column_count: u32) -> Self {
        Self {
            row_count,
            column_count,
        }
    }

    /// Size along the given axis.
    pub fn size_of(&self, dimension: Dimension) -> u32 {
        match dimension {
            Dimension::Rows => self.row_count,
            Dimension::Columns => self.column_count,
        }
    }
}

/// A single cell value.
///
/// Untagged so that JSON payloads read and write as plain scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

/// Sparse cell storage plus the grid's nominal size.
///
/// Cells are keyed by `(row, column)`, zero-indexed. Structural edits
/// shift keys so that surviving cells keep their logical position.
#[derive(Debug, Clone)]
pub struct SheetGrid {
    row_count: u32,
    column_count: u32,
    cells: HashMap<(u32, u32), CellValue>,
}

impl SheetGrid {
    pub fn new(row_count: u32, column_count: u32) -> Self {
        Self {
            row_count,
            column_count,
            cells: HashMap::new(),
        }
    }

    pub fn state(&self) -> GridState {
        GridState::new(self.row_count, self.column_count)
    }

    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    pub fn column_count(&self) -> u32 {
        self.column_count
    }

    /// Number of populated cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, row: u32, column: u32) -> Option<&CellValue> {
        self.cells.get(&(row, column))
    }

    /// Sets a cell, dropping the entry entirely for empty values.
    pub fn set(&mut self, row: u32, column: u32, value: CellValue) {
        if value.is_empty() {
            self.cells.remove(&(row, column));
        } else {
            self.cells.insert((row, column), value);
        }
    }

    /// Inserts `end - start` units before `start` on the given axis.
    ///
    /// Cells at coordinates `>= start` shift up by the range width.
    /// `start` may equal the current size (insertion at the end) but not
    /// exceed it.
    pub fn insert(&mut self, dimension: Dimension, start: u32, end: u32) -> Result<(), SheetError> {
        let size = self.state().size_of(dimension);
        if start > size {
            return Err(SheetError::IndexOutOfRange {
                dimension,
                start,
                end,
                size,
            });
        }
        let width = end - start;
        let new_size = size
            .checked_add(width)
            .ok_or(SheetError::SizeOverflow { operation: "insert" })?;

        self.shift_cells(dimension, start, width as i64);
        self.set_size(dimension, new_size);
        Ok(())
    }

    /// Deletes the half-open range `[start, end)` on the given axis.
    ///
    /// Cells inside the range are dropped; cells beyond it shift down.
    /// Deleting every remaining row or column is rejected.
    pub fn delete(&mut self, dimension: Dimension, start: u32, end: u32) -> Result<(), SheetError> {
        let size = self.state().size_of(dimension);
        if end > size {
            return Err(SheetError::IndexOutOfRange {
                dimension,
                start,
                end,
                size,
            });
        }
        let width = end - start;
        if width >= size {
            return Err(SheetError::CannotDeleteAll { dimension });
        }

        self.cells.retain(|&(row, column), _| {
            let coord = match dimension {
                Dimension::Rows => row,
                Dimension::Columns => column,
            };
            coord < start || coord >= end
        });
        self.shift_cells(dimension, end, -(width as i64));
        self.set_size(dimension, size - width);
        Ok(())
    }

    /// Appends one unit at the current end of the given axis.
    pub fn append(&mut self, dimension: Dimension) -> Result<(), SheetError> {
        let size = self.state().size_of(dimension);
        let new_size = size
            .checked_add(1)
            .ok_or(SheetError::SizeOverflow { operation: "append" })?;
        self.set_size(dimension, new_size);
        Ok(())
    }

    fn set_size(&mut self, dimension: Dimension, size: u32) {
        match dimension {
            Dimension::Rows => self.row_count = size,
            Dimension::Columns => self.column_count = size,
        }
    }

    /// Moves every cell with coordinate `>= from` on the axis by `delta`.
    fn shift_cells(&mut self, dimension: Dimension, from: u32, delta: i64) {
        if delta == 0 {
            return;
        }
        let moved: Vec<((u32, u32), CellValue)> = self
            .cells
            .iter()
            .filter(|(&(row, column), _)| {
                let coord = match dimension {
                    Dimension::Rows => row,
                    Dimension::Columns => column,
                };
                coord >= from
            })
            .map(|(key, value)| (*key, value.clone()))
            .collect();

        for (key, _) in &moved {
            self.cells.remove(key);
        }
        for ((row, column), value) in moved {
            let new_key = match dimension {
                Dimension::Rows => (((row as i64) + delta) as u32, column),
                Dimension::Columns => (row, ((column as i64) + delta) as u32),
            };
            self.cells.insert(new_key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_cell(row: u32, column: u32) -> SheetGrid {
        let mut grid = SheetGrid::new(10, 5);
        grid.set(row, column, CellValue::Text("x".to_string()));
        grid
    }

    #[test]
    fn insert_rows_shifts_cells_below() {
        let mut grid = grid_with_cell(4, 2);
        grid.insert(Dimension::Rows, 2, 5).unwrap();
        assert_eq!(grid.row_count(), 13);
        assert!(grid.get(4, 2).is_none());
        assert_eq!(grid.get(7, 2), Some(&CellValue::Text("x".to_string())));
    }

    #[test]
    fn insert_above_leaves_cell_alone() {
        let mut grid = grid_with_cell(1, 1);
        grid.insert(Dimension::Rows, 5, 6).unwrap();
        assert_eq!(grid.get(1, 1), Some(&CellValue::Text("x".to_string())));
    }

    #[test]
    fn delete_rows_drops_range_and_shifts_rest() {
        let mut grid = SheetGrid::new(10, 5);
        grid.set(3, 0, CellValue::Number(1.0));
        grid.set(7, 0, CellValue::Number(2.0));
        grid.delete(Dimension::Rows, 2, 5).unwrap();
        assert_eq!(grid.row_count(), 7);
        assert!(grid.get(3, 0).is_none());
        assert_eq!(grid.get(4, 0), Some(&CellValue::Number(2.0)));
    }

    #[test]
    fn delete_columns_shifts_left() {
        let mut grid = SheetGrid::new(10, 5);
        grid.set(0, 4, CellValue::Bool(true));
        grid.delete(Dimension::Columns, 1, 3).unwrap();
        assert_eq!(grid.column_count(), 3);
        assert_eq!(grid.get(0, 2), Some(&CellValue::Bool(true)));
    }

    #[test]
    fn delete_past_end_is_out_of_range() {
        let mut grid = SheetGrid::new(10, 5);
        let err = grid.delete(Dimension::Rows, 8, 12).unwrap_err();
        assert!(matches!(err, SheetError::IndexOutOfRange { .. }));
        assert_eq!(grid.row_count(), 10);
    }

    #[test]
    fn delete_all_rows_is_rejected() {
        let mut grid = SheetGrid::new(3, 5);
        let err = grid.delete(Dimension::Rows, 0, 3).unwrap_err();
        assert!(matches!(err, SheetError::CannotDeleteAll { .. }));
        assert_eq!(grid.row_count(), 3);
    }

    #[test]
    fn append_grows_by_one() {
        let mut grid = SheetGrid::new(3, 5);
        grid.append(Dimension::Columns).unwrap();
        assert_eq!(grid.column_count(), 6);
        assert_eq!(grid.row_count(), 3);
    }

    #[test]
    fn insert_at_end_is_allowed() {
        let mut grid = SheetGrid::new(3, 5);
        grid.insert(Dimension::Rows, 3, 4).unwrap();
        assert_eq!(grid.row_count(), 4);
    }

    #[test]
    fn insert_beyond_end_is_out_of_range() {
        let mut grid = SheetGrid::new(3, 5);
        let err = grid.insert(Dimension::Rows, 4, 5).unwrap_err();
        assert!(matches!(err, SheetError::IndexOutOfRange { .. }));
    }

    #[test]
    fn empty_value_clears_cell() {
        let mut grid = grid_with_cell(0, 0);
        grid.set(0, 0, CellValue::Empty);
        assert_eq!(grid.cell_count(), 0);
    }
}
