//! Cell value read and write handlers.

use hyper::{body::Bytes, Request, Response};
use percent_encoding::percent_decode_str;

use crate::router::{AppState, RouterError};
use sheet_ops_core::range::CellRange;
use sheet_ops_runtime::SheetCommand;

use super::request_utils::{
    build_success_response, dispatch, map_sheet_error_to_router_error,
    read_request_body_with_timeout, sheet_param, spreadsheet_param, MatchitParams,
    WriteValuesRequest,
};

/// Reads a rectangular range of cell values.
///
/// # Endpoint
/// `GET /spreadsheets/{id}/sheets/{sheet}/values?range=A1:C3`
///
/// # Response
/// - **200 OK**: Values in row-major order, empty cells padded with null
/// ```json
/// {"range": "A1:C3", "values": [[1, 2, 3], [null, "x", true], [null, null, null]]}
/// ```
///
/// # Errors
/// - **400 Bad Request**: Missing or malformed `range` parameter, or range outside the grid
/// - **404 Not Found**: Unknown spreadsheet or sheet
///
/// # Example
/// ```bash
/// curl 'http://localhost:8080/spreadsheets/ss-1/sheets/0/values?range=A1%3AC3'
/// ```
pub async fn read_values(
    req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let spreadsheet_id = spreadsheet_param(&params)?;
    let sheet_id = sheet_param(&params)?;
    let range = range_query_param(req.uri().query())?;

    let reply = dispatch(&state, |response| SheetCommand::ReadRange {
        spreadsheet_id,
        sheet_id,
        range,
        response,
    })
    .await?;

    build_success_response(200, reply)
}

/// Writes a rectangle of values anchored at the range start.
///
/// # Endpoint
/// `PUT /spreadsheets/{id}/sheets/{sheet}/values`
///
/// # Request Body
/// ```json
/// {"range": "A1:B2", "values": [[1, 2], ["x", true]]}
/// ```
/// Trailing rows and cells may be omitted and keep their current
/// values; a row longer than the range's column span is rejected.
///
/// # Response
/// - **200 OK**: Returns the number of written cells
/// ```json
/// {"updatedCells": 4}
/// ```
///
/// # Errors
/// - **400 Bad Request**: Malformed body, shape mismatch, or range outside the grid
/// - **404 Not Found**: Unknown spreadsheet or sheet
///
/// # Example
/// ```bash
/// curl -X PUT http://localhost:8080/spreadsheets/ss-1/sheets/0/values \
///   -H "Content-Type: application/json" \
///   -d '{"range": "A1:B1", "values": [[1, 2]]}'
/// ```
pub async fn write_values(
    req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let spreadsheet_id = spreadsheet_param(&params)?;
    let sheet_id = sheet_param(&params)?;

    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;

    let request: WriteValuesRequest = serde_json::from_slice(&body_bytes)
        .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))?;

    let range =
        CellRange::parse(&request.range).map_err(map_sheet_error_to_router_error)?;

    let reply = dispatch(&state, |response| SheetCommand::WriteRange {
        spreadsheet_id,
        sheet_id,
        range,
        values: request.values,
        response,
    })
    .await?;

    build_success_response(200, reply)
}

/// Extracts and parses the `range` query parameter.
fn range_query_param(query: Option<&str>) -> Result<CellRange, RouterError> {
    let query = query
        .ok_or_else(|| RouterError::BadRequest("Missing 'range' query parameter".to_string()))?;

    let raw = query
        .split('&')
        .find_map(|pair| pair.strip_prefix("range="))
        .ok_or_else(|| RouterError::BadRequest("Missing 'range' query parameter".to_string()))?;

    let decoded = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|e| RouterError::BadRequest(format!("Invalid 'range' encoding: {}", e)))?;

    CellRange::parse(&decoded).map_err(map_sheet_error_to_router_error)
}
