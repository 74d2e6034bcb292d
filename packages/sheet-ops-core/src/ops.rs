//! Structural dimension operations.

use serde::{Deserialize, Serialize};

use crate::grid::Dimension;

/// The closed set of structural edit kinds.
///
/// Modeled as a tagged variant so every consumer matches exhaustively;
/// adding a kind forces a review of the scheduler, driver, and
/// aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationKind {
    /// Insert `[start_index, end_index)` units before `start_index`.
    Insert {
        start_index: u32,
        end_index: u32,
        inherit_from_before: bool,
    },
    /// Delete the half-open range `[start_index, end_index)`.
    Delete { start_index: u32, end_index: u32 },
    /// Add exactly one unit at the current end of the dimension.
    Append,
}

/// A validated structural edit against one axis of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionOperation {
    pub dimension: Dimension,
    pub kind: OperationKind,
}

impl DimensionOperation {
    /// Number of units this operation adds or removes when applied.
    pub fn affected_count(&self) -> u32 {
        match self.kind {
            OperationKind::Insert {
                start_index,
                end_index,
                ..
            } => end_index - start_index,
            OperationKind::Delete {
                start_index,
                end_index,
            } => end_index - start_index,
            OperationKind::Append => 1,
        }
    }

    /// Wire name of the operation kind, as submitted by callers.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            OperationKind::Insert { .. } => "insertDimension",
            OperationKind::Delete { .. } => "deleteDimension",
            OperationKind::Append => "appendDimension",
        }
    }

    /// Start of the affected range, when the kind carries one.
    pub fn start_index(&self) -> Option<u32> {
        match self.kind {
            OperationKind::Insert { start_index, .. }
            | OperationKind::Delete { start_index, .. } => Some(start_index),
            OperationKind::Append => None,
        }
    }

    /// End of the affected range, when the kind carries one.
    pub fn end_index(&self) -> Option<u32> {
        match self.kind {
            OperationKind::Insert { end_index, .. } | OperationKind::Delete { end_index, .. } => {
                Some(end_index)
            }
            OperationKind::Append => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affected_count_per_kind() {
        let delete = DimensionOperation {
            dimension: Dimension::Rows,
            kind: OperationKind::Delete {
                start_index: 4,
                end_index: 5,
            },
        };
        assert_eq!(delete.affected_count(), 1);

        let insert = DimensionOperation {
            dimension: Dimension::Columns,
            kind: OperationKind::Insert {
                start_index: 1,
                end_index: 3,
                inherit_from_before: false,
            },
        };
        assert_eq!(insert.affected_count(), 2);

        let append = DimensionOperation {
            dimension: Dimension::Rows,
            kind: OperationKind::Append,
        };
        assert_eq!(append.affected_count(), 1);
        assert_eq!(append.start_index(), None);
        assert_eq!(append.kind_name(), "appendDimension");
    }
}
