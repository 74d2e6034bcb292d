//! Execution driver: sequential application of a scheduled batch.

use thiserror::Error;
use tracing::{debug, warn};

use crate::backend::{BackendError, GridBackend, GridRef};
use crate::normalize::ValidationError;
use crate::outcome::{BatchOutcome, OperationResult, OperationStatus, SizeProjection};
use crate::schedule::ScheduledOperation;

/// Whole-batch failures. Per-operation failures are not errors; they
/// are recorded in the [`BatchOutcome`].
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The starting grid size could not be read, so nothing ran
    #[error("Failed to read grid size before execution: {0}")]
    SizeUnavailable(#[source] BackendError),
}

/// Applies a scheduled batch, one operation at a time, in rank order.
///
/// Each mutation call is awaited before the next starts: the validity
/// of every operation's index range depends on the grid having absorbed
/// all earlier-ranked operations. A failed call records its error
/// message and execution continues with the next operation.
pub async fn drive<B: GridBackend + ?Sized>(
    backend: &B,
    grid: &GridRef,
    scheduled: &[ScheduledOperation],
) -> Result<BatchOutcome, EngineError> {
    let initial = backend
        .grid_size(grid)
        .await
        .map_err(EngineError::SizeUnavailable)?;
    debug!(
        spreadsheet = %grid.spreadsheet_id,
        sheet = grid.sheet_id,
        rows = initial.row_count,
        columns = initial.column_count,
        operations = scheduled.len(),
        "starting dimension batch"
    );

    let mut projection = SizeProjection::new(initial);
    let mut results = Vec::with_capacity(scheduled.len());

    for entry in scheduled {
        let op = &entry.op;
        let (status, error) = match backend.apply_dimension(grid, op).await {
            Ok(()) => (OperationStatus::Applied, None),
            Err(err) => {
                warn!(
                    rank = entry.rank,
                    operation = op.kind_name(),
                    dimension = %op.dimension,
                    error = %err,
                    "dimension operation failed, continuing batch"
                );
                (OperationStatus::Failed, Some(err.to_string()))
            }
        };
        projection.absorb(op, status);
        results.push(OperationResult::new(op, status, error));
    }

    Ok(BatchOutcome::assemble(results, projection.current()))
}
