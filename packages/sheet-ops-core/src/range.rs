//! A1-notation cell reference and range handling.

use std::fmt;

use crate::error::SheetError;

/// An inclusive rectangular cell range, zero-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start_row: u32,
    pub start_column: u32,
    pub end_row: u32,
    pub end_column: u32,
}

impl CellRange {
    /// Parse "A1" or "A1:C3" into a range. A single reference is a 1x1
    /// range. Start/end corners are normalized so start <= end.
    pub fn parse(range: &str) -> Result<Self, SheetError> {
        let invalid = |reason: &str| SheetError::InvalidRange {
            range: range.to_string(),
            reason: reason.to_string(),
        };

        let (start, end) = match range.split_once(':') {
            Some((start, end)) => (start, end),
            None => (range, range),
        };
        let (start_column, start_row) =
            parse_cell_ref(start).ok_or_else(|| invalid("malformed start reference"))?;
        let (end_column, end_row) =
            parse_cell_ref(end).ok_or_else(|| invalid("malformed end reference"))?;

        Ok(Self {
            start_row: start_row.min(end_row),
            start_column: start_column.min(end_column),
            end_row: start_row.max(end_row),
            end_column: start_column.max(end_column),
        })
    }

    pub fn row_span(&self) -> u32 {
        self.end_row - self.start_row + 1
    }

    pub fn column_span(&self) -> u32 {
        self.end_column - self.start_column + 1
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{}{}",
            column_label(self.start_column),
            self.start_row + 1,
            column_label(self.end_column),
            self.end_row + 1
        )
    }
}

/// Parse a cell reference like "A1" into (column, row), zero-indexed.
pub fn parse_cell_ref(cell_ref: &str) -> Option<(u32, u32)> {
    let mut column: u32 = 0;
    let mut row: u32 = 0;
    let mut saw_column = false;
    let mut saw_row = false;

    for ch in cell_ref.trim().chars() {
        if ch.is_ascii_alphabetic() && !saw_row {
            let upper = ch.to_ascii_uppercase();
            column = column.checked_mul(26)?.checked_add(upper as u32 - 'A' as u32 + 1)?;
            saw_column = true;
        } else if ch.is_ascii_digit() {
            row = row.checked_mul(10)?.checked_add(ch as u32 - '0' as u32)?;
            saw_row = true;
        } else {
            return None;
        }
    }

    if !saw_column || !saw_row || row == 0 {
        return None;
    }
    Some((column - 1, row - 1))
}

/// Convert a zero-indexed column to its letter label (0 -> A, 26 -> AA).
pub fn column_label(column: u32) -> String {
    let mut result = String::new();
    let mut n = column as u64 + 1;
    while n > 0 {
        n -= 1;
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_cell() {
        let range = CellRange::parse("B3").unwrap();
        assert_eq!(range.start_column, 1);
        assert_eq!(range.start_row, 2);
        assert_eq!(range.row_span(), 1);
        assert_eq!(range.column_span(), 1);
    }

    #[test]
    fn parses_rectangle() {
        let range = CellRange::parse("A1:C10").unwrap();
        assert_eq!(range.start_column, 0);
        assert_eq!(range.end_column, 2);
        assert_eq!(range.end_row, 9);
        assert_eq!(range.to_string(), "A1:C10");
    }

    #[test]
    fn normalizes_reversed_corners() {
        let range = CellRange::parse("C10:A1").unwrap();
        assert_eq!(range.start_row, 0);
        assert_eq!(range.end_row, 9);
    }

    #[test]
    fn double_letter_columns() {
        assert_eq!(parse_cell_ref("AA1"), Some((26, 0)));
        assert_eq!(column_label(26), "AA");
        assert_eq!(column_label(0), "A");
        assert_eq!(column_label(25), "Z");
    }

    #[test]
    fn rejects_garbage() {
        assert!(CellRange::parse("").is_err());
        assert!(CellRange::parse("12").is_err());
        assert!(CellRange::parse("A0").is_err());
        assert!(CellRange::parse("A1:??").is_err());
    }
}
