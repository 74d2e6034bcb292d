//! Operation normalizer: validates and canonicalizes raw descriptors.

use serde::Deserialize;
use thiserror::Error;

use sheet_ops_core::grid::Dimension;
use sheet_ops_core::ops::{DimensionOperation, OperationKind};

/// Raw operation descriptor as submitted by callers.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawDimensionOperation {
    /// One of `insertDimension`, `deleteDimension`, `appendDimension`
    pub operation: RawOperationKind,
    /// `ROWS` or `COLUMNS`
    pub dimension: Dimension,
    /// Signed so that negative submissions fail validation, not parsing
    #[serde(default)]
    pub start_index: Option<i64>,
    #[serde(default)]
    pub end_index: Option<i64>,
    #[serde(default)]
    pub inherit_from_before: Option<bool>,
}

/// Wire names for the three operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RawOperationKind {
    #[serde(rename = "insertDimension")]
    Insert,
    #[serde(rename = "deleteDimension")]
    Delete,
    #[serde(rename = "appendDimension")]
    Append,
}

/// Batch validation errors. Any one of these rejects the whole batch
/// before a single grid-service call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Batch of {got} operations exceeds the maximum of {max}")]
    BatchTooLarge { got: usize, max: usize },

    #[error("Operation {index}: {field} must be a non-negative integer, got {value}")]
    NegativeIndex {
        index: usize,
        field: &'static str,
        value: i64,
    },

    #[error("Operation {index}: {kind} requires startIndex and endIndex")]
    MissingRange { index: usize, kind: &'static str },

    #[error("Operation {index}: endIndex {end} must be greater than startIndex {start}")]
    EmptyRange { index: usize, start: i64, end: i64 },

    #[error("Operation {index}: appendDimension must not carry index fields")]
    AppendWithRange { index: usize },

    #[error("Operation {index}: inheritFromBefore is only valid for insertDimension")]
    InheritOutsideInsert { index: usize },

    #[error("Operation {index}: index {value} exceeds the supported maximum {max}")]
    IndexTooLarge { index: usize, value: i64, max: u32 },
}

/// Validates a raw batch and canonicalizes it into typed operations.
///
/// Pure: no side effects, no calls out. Errors identify the offending
/// entry's position in the submitted batch.
pub fn normalize_batch(
    raw: &[RawDimensionOperation],
    max_batch_operations: usize,
) -> Result<Vec<DimensionOperation>, ValidationError> {
    if raw.len() > max_batch_operations {
        return Err(ValidationError::BatchTooLarge {
            got: raw.len(),
            max: max_batch_operations,
        });
    }

    raw.iter()
        .enumerate()
        .map(|(index, op)| normalize_one(index, op))
        .collect()
}

fn normalize_one(
    index: usize,
    raw: &RawDimensionOperation,
) -> Result<DimensionOperation, ValidationError> {
    let kind = match raw.operation {
        RawOperationKind::Insert => {
            let (start_index, end_index) = require_range(index, raw, "insertDimension")?;
            OperationKind::Insert {
                start_index,
                end_index,
                inherit_from_before: raw.inherit_from_before.unwrap_or(false),
            }
        }
        RawOperationKind::Delete => {
            if raw.inherit_from_before.is_some() {
                return Err(ValidationError::InheritOutsideInsert { index });
            }
            let (start_index, end_index) = require_range(index, raw, "deleteDimension")?;
            OperationKind::Delete {
                start_index,
                end_index,
            }
        }
        RawOperationKind::Append => {
            if raw.start_index.is_some() || raw.end_index.is_some() {
                return Err(ValidationError::AppendWithRange { index });
            }
            if raw.inherit_from_before.is_some() {
                return Err(ValidationError::InheritOutsideInsert { index });
            }
            OperationKind::Append
        }
    };

    Ok(DimensionOperation {
        dimension: raw.dimension,
        kind,
    })
}

fn require_range(
    index: usize,
    raw: &RawDimensionOperation,
    kind: &'static str,
) -> Result<(u32, u32), ValidationError> {
    let (start, end) = match (raw.start_index, raw.end_index) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(ValidationError::MissingRange { index, kind }),
    };
    if start < 0 {
        return Err(ValidationError::NegativeIndex {
            index,
            field: "startIndex",
            value: start,
        });
    }
    if end <= start {
        return Err(ValidationError::EmptyRange { index, start, end });
    }
    let start = to_u32(index, start)?;
    let end = to_u32(index, end)?;
    Ok((start, end))
}

fn to_u32(index: usize, value: i64) -> Result<u32, ValidationError> {
    u32::try_from(value).map_err(|_| ValidationError::IndexTooLarge {
        index,
        value,
        max: u32::MAX,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(
        operation: RawOperationKind,
        dimension: Dimension,
        start: Option<i64>,
        end: Option<i64>,
    ) -> RawDimensionOperation {
        RawDimensionOperation {
            operation,
            dimension,
            start_index: start,
            end_index: end,
            inherit_from_before: None,
        }
    }

    #[test]
    fn accepts_well_formed_batch() {
        let batch = vec![
            raw(RawOperationKind::Delete, Dimension::Rows, Some(0), Some(5)),
            raw(RawOperationKind::Insert, Dimension::Columns, Some(1), Some(3)),
            raw(RawOperationKind::Append, Dimension::Rows, None, None),
        ];
        let ops = normalize_batch(&batch, 10).unwrap();
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[2].kind, OperationKind::Append);
    }

    #[test]
    fn rejects_oversized_batch() {
        let batch: Vec<_> = (0..3)
            .map(|_| raw(RawOperationKind::Append, Dimension::Rows, None, None))
            .collect();
        let err = normalize_batch(&batch, 2).unwrap_err();
        assert_eq!(err, ValidationError::BatchTooLarge { got: 3, max: 2 });
    }

    #[test]
    fn rejects_empty_range_with_position() {
        let batch = vec![
            raw(RawOperationKind::Append, Dimension::Rows, None, None),
            raw(RawOperationKind::Delete, Dimension::Rows, Some(5), Some(5)),
        ];
        let err = normalize_batch(&batch, 10).unwrap_err();
        assert_eq!(
            err,
            ValidationError::EmptyRange {
                index: 1,
                start: 5,
                end: 5
            }
        );
    }

    #[test]
    fn rejects_inverted_range() {
        let batch = vec![raw(
            RawOperationKind::Insert,
            Dimension::Columns,
            Some(7),
            Some(2),
        )];
        assert!(matches!(
            normalize_batch(&batch, 10).unwrap_err(),
            ValidationError::EmptyRange { index: 0, .. }
        ));
    }

    #[test]
    fn rejects_negative_start() {
        let batch = vec![raw(
            RawOperationKind::Delete,
            Dimension::Rows,
            Some(-1),
            Some(3),
        )];
        assert!(matches!(
            normalize_batch(&batch, 10).unwrap_err(),
            ValidationError::NegativeIndex { index: 0, .. }
        ));
    }

    #[test]
    fn rejects_missing_end_index() {
        let batch = vec![raw(RawOperationKind::Delete, Dimension::Rows, Some(1), None)];
        assert!(matches!(
            normalize_batch(&batch, 10).unwrap_err(),
            ValidationError::MissingRange { index: 0, .. }
        ));
    }

    #[test]
    fn rejects_append_with_indices() {
        let batch = vec![raw(RawOperationKind::Append, Dimension::Rows, Some(0), None)];
        assert_eq!(
            normalize_batch(&batch, 10).unwrap_err(),
            ValidationError::AppendWithRange { index: 0 }
        );
    }

    #[test]
    fn rejects_inherit_on_delete() {
        let mut op = raw(RawOperationKind::Delete, Dimension::Rows, Some(0), Some(1));
        op.inherit_from_before = Some(true);
        assert_eq!(
            normalize_batch(&[op], 10).unwrap_err(),
            ValidationError::InheritOutsideInsert { index: 0 }
        );
    }

    #[test]
    fn inherit_defaults_to_false() {
        let op = raw(RawOperationKind::Insert, Dimension::Rows, Some(0), Some(1));
        let ops = normalize_batch(&[op], 10).unwrap();
        assert_eq!(
            ops[0].kind,
            OperationKind::Insert {
                start_index: 0,
                end_index: 1,
                inherit_from_before: false
            }
        );
    }
}
