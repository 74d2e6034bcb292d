//! Channel-backed implementation of the engine's grid backend.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tokio::time;

use sheet_ops_core::error::SheetError;
use sheet_ops_core::grid::GridState;
use sheet_ops_core::ops::DimensionOperation;
use sheet_ops_engine::{BackendError, GridBackend, GridRef};

use crate::command::SheetCommand;
use crate::Result;

/// Grid backend that issues one command per call to the runtime loop.
///
/// Awaiting the oneshot reply before returning is what gives the
/// engine its one-call-in-flight guarantee.
#[derive(Clone)]
pub struct ChannelBackend {
    tx: mpsc::Sender<SheetCommand>,
    response_timeout: Duration,
}

impl ChannelBackend {
    pub fn new(tx: mpsc::Sender<SheetCommand>, response_timeout_ms: u64) -> Self {
        Self {
            tx,
            response_timeout: Duration::from_millis(response_timeout_ms),
        }
    }

    async fn roundtrip(
        &self,
        command: SheetCommand,
        rx: oneshot::Receiver<Result<serde_json::Value>>,
    ) -> std::result::Result<serde_json::Value, BackendError> {
        self.tx
            .send(command)
            .await
            .map_err(|e| BackendError::Unavailable(format!("Command channel closed: {}", e)))?;
        let reply = time::timeout(self.response_timeout, rx)
            .await
            .map_err(|_| BackendError::Unavailable("Grid service timed out".to_string()))?
            .map_err(|e| BackendError::Unavailable(format!("Reply channel closed: {}", e)))?;
        reply.map_err(map_sheet_error)
    }
}

fn map_sheet_error(err: SheetError) -> BackendError {
    match err {
        SheetError::ServiceUnavailable(msg) => BackendError::Unavailable(msg),
        other => BackendError::Rejected(other.to_string()),
    }
}

#[async_trait]
impl GridBackend for ChannelBackend {
    async fn grid_size(&self, grid: &GridRef) -> std::result::Result<GridState, BackendError> {
        let (tx, rx) = oneshot::channel();
        let command = SheetCommand::GridSize {
            spreadsheet_id: grid.spreadsheet_id.clone(),
            sheet_id: grid.sheet_id,
            response: tx,
        };
        let value = self.roundtrip(command, rx).await?;

        let rows = value.get("rows").and_then(|v| v.as_u64());
        let columns = value.get("columns").and_then(|v| v.as_u64());
        match (rows, columns) {
            (Some(rows), Some(columns)) => Ok(GridState::new(rows as u32, columns as u32)),
            _ => Err(BackendError::Unavailable(
                "Malformed grid size reply".to_string(),
            )),
        }
    }

    async fn apply_dimension(
        &self,
        grid: &GridRef,
        op: &DimensionOperation,
    ) -> std::result::Result<(), BackendError> {
        let (tx, rx) = oneshot::channel();
        let command = SheetCommand::MutateDimension {
            spreadsheet_id: grid.spreadsheet_id.clone(),
            sheet_id: grid.sheet_id,
            op: *op,
            response: tx,
        };
        self.roundtrip(command, rx).await.map(|_| ())
    }
}
