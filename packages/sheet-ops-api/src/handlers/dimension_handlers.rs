//! Batch dimension-mutation handler.

use hyper::{body::Bytes, Request, Response};
use serde::Serialize;
use tracing::info;

use crate::router::{AppState, RouterError};
use sheet_ops_engine::{apply_batch, BatchOutcome, GridRef};
use sheet_ops_runtime::{ChannelBackend, SheetCommand};

use super::request_utils::{
    build_success_response, dispatch, map_engine_error_to_router_error,
    read_request_body_with_timeout, sheet_param, spreadsheet_param, DimensionBatchRequest,
    MatchitParams, ResourceInfo,
};

/// Outcome of a dimension batch, with the resources it touched.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DimensionBatchResponse {
    spreadsheet: ResourceInfo<String>,
    sheet: ResourceInfo<u64>,
    #[serde(flatten)]
    outcome: BatchOutcome,
}

/// Applies an ordered batch of structural edits to one sheet's grid.
///
/// Operations are validated as a whole, reordered so every stated index
/// stays valid at execution time, then applied one at a time. A failed
/// operation is recorded and the rest of the batch continues.
///
/// # Endpoint
/// `POST /spreadsheets/{id}/sheets/{sheet}/dimensions`
///
/// # Request Body
/// ```json
/// {
///   "operations": [
///     {"operation": "insertDimension", "dimension": "ROWS",
///      "startIndex": 5, "endIndex": 8, "inheritFromBefore": true},
///     {"operation": "deleteDimension", "dimension": "COLUMNS",
///      "startIndex": 2, "endIndex": 4},
///     {"operation": "appendDimension", "dimension": "ROWS"}
///   ]
/// }
/// ```
///
/// # Response
/// - **200 OK**: Per-operation results in execution order plus the
///   projected grid size
/// ```json
/// {
///   "spreadsheet": {"id": "ss-1", "title": "Budget 2026", "url": "..."},
///   "sheet": {"id": 0, "title": "Sheet1", "url": "..."},
///   "totalOperations": 3,
///   "operationResults": [
///     {"operation": "deleteDimension", "dimension": "COLUMNS",
///      "startIndex": 2, "endIndex": 4, "affectedCount": 2, "status": "applied"}
///   ],
///   "updatedDimensions": {"rows": 1004, "columns": 24}
/// }
/// ```
///
/// # Errors
/// - **400 Bad Request**: Malformed body, oversized batch, or an invalid
///   operation descriptor (the whole batch is rejected before any call)
/// - **404 Not Found**: Unknown spreadsheet or sheet
/// - **500 Internal Server Error**: Grid size unreadable or channel failure
///
/// # Example
/// ```bash
/// curl -X POST http://localhost:8080/spreadsheets/ss-1/sheets/0/dimensions \
///   -H "Content-Type: application/json" \
///   -d '{"operations": [{"operation": "appendDimension", "dimension": "ROWS"}]}'
/// ```
pub async fn batch_update_dimensions(
    req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let spreadsheet_id = spreadsheet_param(&params)?;
    let sheet_id = sheet_param(&params)?;

    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;

    let request: DimensionBatchRequest = serde_json::from_slice(&body_bytes)
        .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))?;

    // Resolve identities up front so an unknown target is a 404, not a
    // per-operation failure.
    let meta = dispatch(&state, |response| SheetCommand::SheetMeta {
        spreadsheet_id: spreadsheet_id.clone(),
        sheet_id,
        response,
    })
    .await?;

    info!(
        spreadsheet = %spreadsheet_id,
        sheet = sheet_id,
        operations = request.operations.len(),
        "applying dimension batch"
    );

    let backend = ChannelBackend::new(
        state.command_tx.clone(),
        state.config.response_timeout_ms,
    );
    let grid = GridRef {
        spreadsheet_id: spreadsheet_id.clone(),
        sheet_id,
    };

    let outcome = apply_batch(
        &backend,
        &grid,
        request.operations,
        state.config.max_batch_operations,
    )
    .await
    .map_err(map_engine_error_to_router_error)?;

    let spreadsheet_title = meta_title(&meta, "spreadsheet")?;
    let sheet_title = meta_title(&meta, "sheet")?;
    let response_data = DimensionBatchResponse {
        spreadsheet: ResourceInfo {
            id: spreadsheet_id.clone(),
            title: spreadsheet_title,
            url: format!("{}/spreadsheets/{}", state.config.base_url, spreadsheet_id),
        },
        sheet: ResourceInfo {
            id: sheet_id,
            title: sheet_title,
            url: format!(
                "{}/spreadsheets/{}/sheets/{}",
                state.config.base_url, spreadsheet_id, sheet_id
            ),
        },
        outcome,
    };

    build_success_response(200, response_data)
}

fn meta_title(meta: &serde_json::Value, key: &str) -> Result<String, RouterError> {
    meta.get(key)
        .and_then(|v| v.get("title"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| RouterError::InternalError("Invalid response from runtime".to_string()))
}
