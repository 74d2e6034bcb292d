//! Request utilities for HTTP endpoints.

use http_body_util::BodyExt;
use hyper::{body::Bytes, Request, Response};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tokio::time;

use crate::router::{AppState, RouterError};
use sheet_ops_core::error::SheetError;
use sheet_ops_core::grid::CellValue;
use sheet_ops_engine::{EngineError, RawDimensionOperation};
use sheet_ops_runtime::{ResponseSender, SheetCommand};

/// Type alias for matchit parameters with explicit lifetimes
pub type MatchitParams<'a, 'b> = matchit::Params<'a, 'b>;

/// Helper function to read request body with timeout
pub async fn read_request_body_with_timeout(
    req: Request<hyper::body::Incoming>,
    timeout_ms: u64,
) -> Result<Bytes, RouterError> {
    let timeout_duration = time::Duration::from_millis(timeout_ms);
    let body = time::timeout(timeout_duration, req.collect())
        .await
        .map_err(|_| RouterError::Timeout)?
        .map_err(|e| RouterError::InternalError(format!("Failed to read request body: {}", e)))?;
    Ok(body.to_bytes())
}

/// Helper function to wait for a runtime reply with timeout
pub async fn wait_for_response_with_timeout<T>(
    rx: oneshot::Receiver<T>,
    timeout_ms: u64,
) -> Result<T, RouterError> {
    let timeout_duration = time::Duration::from_millis(timeout_ms);
    time::timeout(timeout_duration, rx)
        .await
        .map_err(|_| RouterError::Timeout)?
        .map_err(|e| RouterError::InternalError(format!("Response channel closed: {}", e)))
}

/// Sends one command to the runtime and waits for its reply.
pub async fn dispatch(
    state: &AppState,
    build: impl FnOnce(ResponseSender) -> SheetCommand,
) -> Result<serde_json::Value, RouterError> {
    let (tx, rx) = oneshot::channel();
    state
        .command_tx
        .send(build(tx))
        .await
        .map_err(|e| RouterError::InternalError(format!("Channel closed: {}", e)))?;
    let result = wait_for_response_with_timeout(rx, state.config.response_timeout_ms).await?;
    result.map_err(map_sheet_error_to_router_error)
}

/// Map SheetError to appropriate RouterError
pub fn map_sheet_error_to_router_error(e: SheetError) -> RouterError {
    match e {
        SheetError::SpreadsheetNotFound { .. } | SheetError::SheetNotFound { .. } => {
            RouterError::NotFound(e.to_string())
        }
        SheetError::SheetAlreadyExists { .. }
        | SheetError::IndexOutOfRange { .. }
        | SheetError::CannotDeleteAll { .. }
        | SheetError::CannotDeleteLastSheet { .. }
        | SheetError::InvalidRange { .. }
        | SheetError::ValueShapeMismatch { .. } => RouterError::BadRequest(e.to_string()),
        _ => RouterError::InternalError(format!("Runtime error: {}", e)),
    }
}

/// Map engine errors onto transport errors. Validation rejects the
/// request; an unreachable grid service is an internal failure.
pub fn map_engine_error_to_router_error(e: EngineError) -> RouterError {
    match e {
        EngineError::Validation(err) => RouterError::BadRequest(err.to_string()),
        EngineError::SizeUnavailable(err) => RouterError::InternalError(err.to_string()),
    }
}

/// Required spreadsheet id path parameter.
pub fn spreadsheet_param(params: &MatchitParams<'_, '_>) -> Result<String, RouterError> {
    params
        .get("id")
        .map(str::to_string)
        .ok_or_else(|| RouterError::BadRequest("Missing spreadsheet id".to_string()))
}

/// Required numeric sheet id path parameter.
pub fn sheet_param(params: &MatchitParams<'_, '_>) -> Result<u64, RouterError> {
    let raw = params
        .get("sheet")
        .ok_or_else(|| RouterError::BadRequest("Missing sheet id".to_string()))?;
    raw.parse()
        .map_err(|_| RouterError::BadRequest(format!("Invalid sheet id '{}'", raw)))
}

/// Request to create a spreadsheet.
#[derive(Debug, Deserialize)]
pub struct CreateSpreadsheetRequest {
    /// Spreadsheet title
    pub title: String,
}

/// Request to add a sheet.
#[derive(Debug, Deserialize)]
pub struct AddSheetRequest {
    /// Sheet title
    pub title: String,
    /// Initial row count (service default when omitted)
    pub rows: Option<u32>,
    /// Initial column count (service default when omitted)
    pub columns: Option<u32>,
}

/// Request to rename or copy a sheet.
#[derive(Debug, Deserialize)]
pub struct SheetTitleRequest {
    /// New sheet title
    pub title: String,
}

/// Request to write a rectangle of values.
#[derive(Debug, Deserialize)]
pub struct WriteValuesRequest {
    /// A1 range the values anchor to
    pub range: String,
    /// Row-major values
    pub values: Vec<Vec<CellValue>>,
}

/// Request for a dimension batch update.
#[derive(Debug, Deserialize)]
pub struct DimensionBatchRequest {
    /// Ordered operation descriptors
    pub operations: Vec<RawDimensionOperation>,
}

/// Resource identity echoed in responses.
#[derive(Debug, Serialize)]
pub struct ResourceInfo<Id: Serialize> {
    pub id: Id,
    pub title: String,
    pub url: String,
}

/// Helper to build HTTP response with proper error handling
pub fn build_response(status: u16, json: Vec<u8>) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Bytes::from(json))
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}

/// Helper to build empty HTTP response (for 204 No Content)
pub fn build_empty_response(status: u16) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .body(Bytes::new())
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}

/// Serializes a success payload under the envelope and builds the response.
pub fn build_success_response<T: Serialize>(
    status: u16,
    data: T,
) -> Result<Response<Bytes>, RouterError> {
    let json = super::response::success_body(&data)
        .map_err(|e| RouterError::InternalError(format!("Failed to serialize response: {}", e)))?;
    build_response(status, json)
}
