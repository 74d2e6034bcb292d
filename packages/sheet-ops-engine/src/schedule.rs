//! Priority scheduler: computes the deterministic execution order.

use sheet_ops_core::ops::{DimensionOperation, OperationKind};

/// A validated operation annotated with its place in the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledOperation {
    pub op: DimensionOperation,
    /// Position in the submitted batch, used for stable tie-breaking
    pub submission_index: usize,
    /// Position in the execution order
    pub rank: usize,
}

/// Orders a validated batch for sequential execution.
///
/// Deletes run first, descending by start index, so removing a
/// higher-indexed range never shifts the anchor of a pending
/// lower-indexed delete. Inserts follow, ascending by start index, so
/// each insert's stated index is meaningful against the grid as it
/// stands when the insert runs. Appends run last; each targets the
/// current end of its dimension. Submission order is the final
/// tie-break (stable sort), across dimensions and within identical
/// (kind, index) ties.
pub fn schedule(operations: Vec<DimensionOperation>) -> Vec<ScheduledOperation> {
    let mut scheduled: Vec<ScheduledOperation> = operations
        .into_iter()
        .enumerate()
        .map(|(submission_index, op)| ScheduledOperation {
            op,
            submission_index,
            rank: 0,
        })
        .collect();

    // Stable sort: equal keys keep submission order.
    scheduled.sort_by_key(|entry| sort_key(&entry.op));

    for (rank, entry) in scheduled.iter_mut().enumerate() {
        entry.rank = rank;
    }
    scheduled
}

/// (kind group, within-kind index order). Deletes sort by negated start
/// index so higher anchors run first.
fn sort_key(op: &DimensionOperation) -> (u8, i64) {
    match op.kind {
        OperationKind::Delete { start_index, .. } => (0, -(start_index as i64)),
        OperationKind::Insert { start_index, .. } => (1, start_index as i64),
        OperationKind::Append => (2, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_ops_core::grid::Dimension;

    fn delete(dimension: Dimension, start: u32, end: u32) -> DimensionOperation {
        DimensionOperation {
            dimension,
            kind: OperationKind::Delete {
                start_index: start,
                end_index: end,
            },
        }
    }

    fn insert(dimension: Dimension, start: u32, end: u32) -> DimensionOperation {
        DimensionOperation {
            dimension,
            kind: OperationKind::Insert {
                start_index: start,
                end_index: end,
                inherit_from_before: false,
            },
        }
    }

    fn append(dimension: Dimension) -> DimensionOperation {
        DimensionOperation {
            dimension,
            kind: OperationKind::Append,
        }
    }

    #[test]
    fn deletes_run_descending_by_start_index() {
        let scheduled = schedule(vec![
            delete(Dimension::Rows, 0, 5),
            delete(Dimension::Rows, 10, 20),
        ]);
        assert_eq!(scheduled[0].op, delete(Dimension::Rows, 10, 20));
        assert_eq!(scheduled[1].op, delete(Dimension::Rows, 0, 5));
        assert_eq!(scheduled[0].rank, 0);
        assert_eq!(scheduled[1].rank, 1);
    }

    #[test]
    fn inserts_run_ascending_by_start_index() {
        let scheduled = schedule(vec![
            insert(Dimension::Columns, 8, 9),
            insert(Dimension::Columns, 2, 4),
        ]);
        assert_eq!(scheduled[0].op, insert(Dimension::Columns, 2, 4));
        assert_eq!(scheduled[1].op, insert(Dimension::Columns, 8, 9));
    }

    #[test]
    fn kinds_group_delete_insert_append() {
        let scheduled = schedule(vec![
            append(Dimension::Rows),
            insert(Dimension::Rows, 0, 1),
            delete(Dimension::Rows, 5, 6),
        ]);
        assert!(matches!(scheduled[0].op.kind, OperationKind::Delete { .. }));
        assert!(matches!(scheduled[1].op.kind, OperationKind::Insert { .. }));
        assert!(matches!(scheduled[2].op.kind, OperationKind::Append));
    }

    #[test]
    fn mixed_dimension_example_order() {
        // The worked example: delete COLUMNS(1,3), append ROWS,
        // insert COLUMNS(1,3), delete ROWS(500,600).
        let scheduled = schedule(vec![
            delete(Dimension::Columns, 1, 3),
            append(Dimension::Rows),
            insert(Dimension::Columns, 1, 3),
            delete(Dimension::Rows, 500, 600),
        ]);
        assert_eq!(scheduled[0].op, delete(Dimension::Rows, 500, 600));
        assert_eq!(scheduled[1].op, delete(Dimension::Columns, 1, 3));
        assert_eq!(scheduled[2].op, insert(Dimension::Columns, 1, 3));
        assert_eq!(scheduled[3].op, append(Dimension::Rows));
    }

    #[test]
    fn identical_keys_keep_submission_order() {
        let scheduled = schedule(vec![
            delete(Dimension::Rows, 3, 4),
            delete(Dimension::Columns, 3, 5),
            append(Dimension::Columns),
            append(Dimension::Rows),
        ]);
        // Same (kind, start) key: ROWS delete was submitted first.
        assert_eq!(scheduled[0].submission_index, 0);
        assert_eq!(scheduled[1].submission_index, 1);
        // Appends keep submission order too.
        assert_eq!(scheduled[2].op, append(Dimension::Columns));
        assert_eq!(scheduled[3].op, append(Dimension::Rows));
    }

    #[test]
    fn ranks_are_dense_and_ordered() {
        let scheduled = schedule(vec![
            append(Dimension::Rows),
            delete(Dimension::Rows, 1, 2),
            insert(Dimension::Rows, 0, 1),
        ]);
        let ranks: Vec<usize> = scheduled.iter().map(|s| s.rank).collect();
        assert_eq!(ranks, vec![0, 1, 2]);
    }
}
