//! Outcome aggregation: per-operation results and the running size
//! projection.

use serde::Serialize;

use sheet_ops_core::grid::{Dimension, GridState};
use sheet_ops_core::ops::{DimensionOperation, OperationKind};

/// Whether a scheduled operation committed on the grid service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    Applied,
    Failed,
}

/// Outcome of one scheduled operation, echoing its fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    pub operation: &'static str,
    pub dimension: Dimension,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_index: Option<u32>,
    pub affected_count: u32,
    pub status: OperationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OperationResult {
    pub fn new(op: &DimensionOperation, status: OperationStatus, error: Option<String>) -> Self {
        Self {
            operation: op.kind_name(),
            dimension: op.dimension,
            start_index: op.start_index(),
            end_index: op.end_index(),
            affected_count: op.affected_count(),
            status,
            error,
        }
    }

    pub fn failed(&self) -> bool {
        self.status == OperationStatus::Failed
    }
}

/// Projected grid size in the response's wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdatedDimensions {
    pub rows: u32,
    pub columns: u32,
}

impl From<GridState> for UpdatedDimensions {
    fn from(state: GridState) -> Self {
        Self {
            rows: state.row_count,
            columns: state.column_count,
        }
    }
}

/// Final report for one batch, in execution order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub total_operations: usize,
    pub operation_results: Vec<OperationResult>,
    pub updated_dimensions: UpdatedDimensions,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<OperationResult>,
}

impl BatchOutcome {
    pub fn assemble(operation_results: Vec<OperationResult>, projected: GridState) -> Self {
        let failures = operation_results
            .iter()
            .filter(|result| result.failed())
            .cloned()
            .collect();
        Self {
            total_operations: operation_results.len(),
            operation_results,
            updated_dimensions: projected.into(),
            failures,
        }
    }
}

/// Running size projection.
///
/// Starts from the size read before the first operation and absorbs
/// each applied operation; failed operations leave it unchanged. The
/// result is a computed projection, never re-read from the grid
/// service. Ambiguous outcomes count as failed.
#[derive(Debug, Clone, Copy)]
pub struct SizeProjection {
    state: GridState,
}

impl SizeProjection {
    pub fn new(initial: GridState) -> Self {
        Self { state: initial }
    }

    /// Folds one completed operation into the projection.
    pub fn absorb(&mut self, op: &DimensionOperation, status: OperationStatus) {
        if status == OperationStatus::Failed {
            return;
        }
        let count = op.affected_count();
        let current = self.state.size_of(op.dimension);
        let updated = match op.kind {
            OperationKind::Delete { .. } => current.saturating_sub(count),
            OperationKind::Insert { .. } | OperationKind::Append => current.saturating_add(count),
        };
        match op.dimension {
            Dimension::Rows => self.state.row_count = updated,
            Dimension::Columns => self.state.column_count = updated,
        }
    }

    pub fn current(&self) -> GridState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(dimension: Dimension, kind: OperationKind) -> DimensionOperation {
        DimensionOperation { dimension, kind }
    }

    #[test]
    fn applied_operations_move_the_projection() {
        let mut projection = SizeProjection::new(GridState::new(100, 10));
        projection.absorb(
            &op(
                Dimension::Rows,
                OperationKind::Delete {
                    start_index: 10,
                    end_index: 30,
                },
            ),
            OperationStatus::Applied,
        );
        projection.absorb(
            &op(Dimension::Columns, OperationKind::Append),
            OperationStatus::Applied,
        );
        assert_eq!(projection.current(), GridState::new(80, 11));
    }

    #[test]
    fn failed_operations_leave_the_projection_unchanged() {
        let mut projection = SizeProjection::new(GridState::new(100, 10));
        projection.absorb(
            &op(
                Dimension::Rows,
                OperationKind::Insert {
                    start_index: 0,
                    end_index: 50,
                    inherit_from_before: false,
                },
            ),
            OperationStatus::Failed,
        );
        assert_eq!(projection.current(), GridState::new(100, 10));
    }

    #[test]
    fn failures_subset_collects_failed_results() {
        let delete = op(
            Dimension::Rows,
            OperationKind::Delete {
                start_index: 0,
                end_index: 1,
            },
        );
        let results = vec![
            OperationResult::new(&delete, OperationStatus::Applied, None),
            OperationResult::new(&delete, OperationStatus::Failed, Some("boom".to_string())),
        ];
        let outcome = BatchOutcome::assemble(results, GridState::new(9, 10));
        assert_eq!(outcome.total_operations, 2);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].error.as_deref(), Some("boom"));
        assert_eq!(outcome.updated_dimensions.rows, 9);
    }
}
