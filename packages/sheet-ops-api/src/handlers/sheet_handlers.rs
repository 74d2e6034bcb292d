//! Spreadsheet and sheet management handlers.

use hyper::{body::Bytes, Request, Response};

use crate::router::{AppState, RouterError};
use sheet_ops_runtime::SheetCommand;

use super::request_utils::{
    build_empty_response, build_success_response, dispatch, read_request_body_with_timeout,
    sheet_param, spreadsheet_param, AddSheetRequest, CreateSpreadsheetRequest, MatchitParams,
    SheetTitleRequest,
};

/// Creates a new spreadsheet with one default sheet.
///
/// # Endpoint
/// `POST /spreadsheets`
///
/// # Request Body
/// ```json
/// {"title": "Budget 2026"}
/// ```
///
/// # Response
/// - **201 Created**: Returns the spreadsheet id and title
/// ```json
/// {"id": "ss-1", "title": "Budget 2026"}
/// ```
///
/// # Errors
/// - **400 Bad Request**: Malformed request body
/// - **500 Internal Server Error**: Runtime error or channel communication failure
///
/// # Example
/// ```bash
/// curl -X POST http://localhost:8080/spreadsheets \
///   -H "Content-Type: application/json" \
///   -d '{"title": "Budget 2026"}'
/// ```
pub async fn create_spreadsheet(
    req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;

    let request: CreateSpreadsheetRequest = serde_json::from_slice(&body_bytes)
        .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))?;

    let reply = dispatch(&state, |response| SheetCommand::CreateSpreadsheet {
        title: request.title,
        response,
    })
    .await?;

    build_success_response(201, reply)
}

/// Lists all spreadsheets.
///
/// # Endpoint
/// `GET /spreadsheets`
///
/// # Response
/// - **200 OK**: Returns spreadsheet ids and titles
/// ```json
/// {"spreadsheets": [{"id": "ss-1", "title": "Budget 2026"}]}
/// ```
///
/// # Example
/// ```bash
/// curl http://localhost:8080/spreadsheets
/// ```
pub async fn list_spreadsheets(
    _req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let reply = dispatch(&state, |response| SheetCommand::ListSpreadsheets { response }).await?;

    build_success_response(200, reply)
}

/// Adds a sheet to a spreadsheet.
///
/// # Endpoint
/// `POST /spreadsheets/{id}/sheets`
///
/// # Request Body
/// ```json
/// {"title": "Q3", "rows": 500, "columns": 10}
/// ```
/// `rows` and `columns` fall back to the service defaults when omitted.
///
/// # Response
/// - **201 Created**: Returns the new sheet's metadata
///
/// # Errors
/// - **400 Bad Request**: Malformed body or duplicate sheet title
/// - **404 Not Found**: Unknown spreadsheet
/// - **500 Internal Server Error**: Runtime error or channel communication failure
///
/// # Example
/// ```bash
/// curl -X POST http://localhost:8080/spreadsheets/ss-1/sheets \
///   -H "Content-Type: application/json" \
///   -d '{"title": "Q3"}'
/// ```
pub async fn add_sheet(
    req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let spreadsheet_id = spreadsheet_param(&params)?;

    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;

    let request: AddSheetRequest = serde_json::from_slice(&body_bytes)
        .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))?;

    let reply = dispatch(&state, |response| SheetCommand::AddSheet {
        spreadsheet_id,
        title: request.title,
        rows: request.rows,
        columns: request.columns,
        response,
    })
    .await?;

    build_success_response(201, reply)
}

/// Lists the sheets of a spreadsheet with their sizes.
///
/// # Endpoint
/// `GET /spreadsheets/{id}/sheets`
///
/// # Response
/// - **200 OK**:
/// ```json
/// {"sheets": [{"id": 0, "title": "Sheet1", "rowCount": 1000, "columnCount": 26}]}
/// ```
///
/// # Errors
/// - **404 Not Found**: Unknown spreadsheet
///
/// # Example
/// ```bash
/// curl http://localhost:8080/spreadsheets/ss-1/sheets
/// ```
pub async fn list_sheets(
    _req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let spreadsheet_id = spreadsheet_param(&params)?;

    let reply = dispatch(&state, |response| SheetCommand::ListSheets {
        spreadsheet_id,
        response,
    })
    .await?;

    build_success_response(200, reply)
}

/// Renames a sheet.
///
/// # Endpoint
/// `PUT /spreadsheets/{id}/sheets/{sheet}`
///
/// # Request Body
/// ```json
/// {"title": "Renamed"}
/// ```
///
/// # Response
/// - **200 OK**: Returns the updated sheet metadata
///
/// # Errors
/// - **400 Bad Request**: Malformed body or duplicate sheet title
/// - **404 Not Found**: Unknown spreadsheet or sheet
///
/// # Example
/// ```bash
/// curl -X PUT http://localhost:8080/spreadsheets/ss-1/sheets/0 \
///   -H "Content-Type: application/json" \
///   -d '{"title": "Renamed"}'
/// ```
pub async fn rename_sheet(
    req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let spreadsheet_id = spreadsheet_param(&params)?;
    let sheet_id = sheet_param(&params)?;

    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;

    let request: SheetTitleRequest = serde_json::from_slice(&body_bytes)
        .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))?;

    let reply = dispatch(&state, |response| SheetCommand::RenameSheet {
        spreadsheet_id,
        sheet_id,
        title: request.title,
        response,
    })
    .await?;

    build_success_response(200, reply)
}

/// Deletes a sheet.
///
/// # Endpoint
/// `DELETE /spreadsheets/{id}/sheets/{sheet}`
///
/// # Response
/// - **204 No Content**: Sheet successfully deleted
///
/// # Errors
/// - **400 Bad Request**: Deleting the last remaining sheet
/// - **404 Not Found**: Unknown spreadsheet or sheet
///
/// # Example
/// ```bash
/// curl -X DELETE http://localhost:8080/spreadsheets/ss-1/sheets/1
/// ```
pub async fn delete_sheet(
    _req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let spreadsheet_id = spreadsheet_param(&params)?;
    let sheet_id = sheet_param(&params)?;

    dispatch(&state, |response| SheetCommand::DeleteSheet {
        spreadsheet_id,
        sheet_id,
        response,
    })
    .await?;

    build_empty_response(204)
}

/// Copies a sheet, cells included, under a new title.
///
/// # Endpoint
/// `POST /spreadsheets/{id}/sheets/{sheet}/copy`
///
/// # Request Body
/// ```json
/// {"title": "Q3 (copy)"}
/// ```
///
/// # Response
/// - **201 Created**: Returns the new sheet's metadata
///
/// # Errors
/// - **400 Bad Request**: Malformed body or duplicate sheet title
/// - **404 Not Found**: Unknown spreadsheet or sheet
///
/// # Example
/// ```bash
/// curl -X POST http://localhost:8080/spreadsheets/ss-1/sheets/0/copy \
///   -H "Content-Type: application/json" \
///   -d '{"title": "Q3 (copy)"}'
/// ```
pub async fn copy_sheet(
    req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let spreadsheet_id = spreadsheet_param(&params)?;
    let sheet_id = sheet_param(&params)?;

    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;

    let request: SheetTitleRequest = serde_json::from_slice(&body_bytes)
        .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))?;

    let reply = dispatch(&state, |response| SheetCommand::CopySheet {
        spreadsheet_id,
        sheet_id,
        new_title: request.title,
        response,
    })
    .await?;

    build_success_response(201, reply)
}
