//! The engine's view of the remote grid-mutation API.

use async_trait::async_trait;
use thiserror::Error;

use sheet_ops_core::grid::GridState;
use sheet_ops_core::ops::DimensionOperation;

/// Identifies the grid a batch targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRef {
    pub spreadsheet_id: String,
    pub sheet_id: u64,
}

/// Errors surfaced by the grid service for a single call.
#[derive(Error, Debug, Clone)]
pub enum BackendError {
    /// The service rejected this specific mutation
    #[error("{0}")]
    Rejected(String),

    /// The service could not be reached at all
    #[error("Grid service unavailable: {0}")]
    Unavailable(String),
}

/// Single-operation contract with the grid service.
///
/// The engine issues exactly one call per scheduled operation and waits
/// for its outcome before the next. Authentication, rate limiting, and
/// transport-level retries are the implementor's concern.
#[async_trait]
pub trait GridBackend: Send + Sync {
    /// Current size of the target grid.
    async fn grid_size(&self, grid: &GridRef) -> Result<GridState, BackendError>;

    /// Apply one structural change; success or a specific failure reason.
    async fn apply_dimension(
        &self,
        grid: &GridRef,
        op: &DimensionOperation,
    ) -> Result<(), BackendError>;
}
