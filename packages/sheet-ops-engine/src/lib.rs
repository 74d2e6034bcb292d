//! Batch dimension-mutation engine.
//!
//! Accepts an ordered batch of heterogeneous structural edits against a
//! single grid, reorders them so every stated index stays valid at the
//! moment it runs, executes them one at a time against the grid service,
//! and reports per-operation outcomes together with a projected
//! before/after grid size.
//!
//! Pipeline: raw batch → [`normalize`] → [`schedule`] → [`execute`]
//! (which folds each step into the outcome projection) → [`BatchOutcome`].

pub mod backend;
pub mod execute;
pub mod normalize;
pub mod outcome;
pub mod schedule;

pub use backend::{BackendError, GridBackend, GridRef};
pub use execute::{drive, EngineError};
pub use normalize::{normalize_batch, RawDimensionOperation, ValidationError};
pub use outcome::{BatchOutcome, OperationResult, OperationStatus};
pub use schedule::{schedule, ScheduledOperation};

/// Full engine pipeline: validate, order, and execute one batch.
///
/// Validation failures abort before any grid-service call. Individual
/// operation failures are recorded in the outcome and never abort the
/// batch.
pub async fn apply_batch<B: GridBackend + ?Sized>(
    backend: &B,
    grid: &GridRef,
    raw: Vec<RawDimensionOperation>,
    max_batch_operations: usize,
) -> Result<BatchOutcome, EngineError> {
    let operations = normalize_batch(&raw, max_batch_operations)?;
    let scheduled = schedule(operations);
    drive(backend, grid, &scheduled).await
}
