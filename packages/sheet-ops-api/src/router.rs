//! Matchit routing configuration.

use std::sync::Arc;

use hyper::{body::Bytes, Request, Response};
use matchit::Router as MatchitRouter;
use tokio::sync::mpsc;

use crate::handlers;
use sheet_ops_core::config::ServiceConfig;
use sheet_ops_runtime::SheetCommand;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration
    pub config: Arc<ServiceConfig>,
    /// Command sender to the workbook runtime
    pub command_tx: mpsc::Sender<SheetCommand>,
}

/// HTTP request router.
pub struct Router {
    inner: MatchitRouter<RouteHandler>,
    state: AppState,
}

impl Router {
    /// Creates a new router with default routes.
    pub fn new(config: Arc<ServiceConfig>, command_tx: mpsc::Sender<SheetCommand>) -> Self {
        let mut router = MatchitRouter::new();

        router
            .insert("/spreadsheets", RouteHandler::Spreadsheet)
            .expect("Failed to insert /spreadsheets route");
        router
            .insert("/spreadsheets/:id/sheets", RouteHandler::SheetCollection)
            .expect("Failed to insert /spreadsheets/:id/sheets route");
        router
            .insert("/spreadsheets/:id/sheets/:sheet", RouteHandler::Sheet)
            .expect("Failed to insert /spreadsheets/:id/sheets/:sheet route");
        router
            .insert(
                "/spreadsheets/:id/sheets/:sheet/copy",
                RouteHandler::SheetCopy,
            )
            .expect("Failed to insert sheet copy route");
        router
            .insert(
                "/spreadsheets/:id/sheets/:sheet/values",
                RouteHandler::Values,
            )
            .expect("Failed to insert values route");
        router
            .insert(
                "/spreadsheets/:id/sheets/:sheet/dimensions",
                RouteHandler::Dimensions,
            )
            .expect("Failed to insert dimensions route");

        Self {
            inner: router,
            state: AppState { config, command_tx },
        }
    }

    /// Routes an incoming request to the appropriate handler.
    pub async fn route(
        &self,
        req: Request<hyper::body::Incoming>,
    ) -> Result<Response<Bytes>, RouterError> {
        let path = req.uri().path().to_string();

        match self.inner.at(&path) {
            Ok(matched) => {
                let handler = matched.value;
                handler
                    .handle(req, matched.params, self.state.clone())
                    .await
            }
            Err(_) => {
                let body =
                    crate::handlers::error_body(404, &format!("No route found for {}", path));
                Ok(Response::builder()
                    .status(404)
                    .header("Content-Type", "application/json")
                    .body(Bytes::from(body))
                    .map_err(|e| {
                        RouterError::InternalError(format!("Failed to build response: {}", e))
                    })?)
            }
        }
    }
}

/// Route handler selector.
enum RouteHandler {
    Spreadsheet,
    SheetCollection,
    Sheet,
    SheetCopy,
    Values,
    Dimensions,
}

impl RouteHandler {
    /// Handles a request with the given route parameters.
    async fn handle(
        &self,
        req: Request<hyper::body::Incoming>,
        params: matchit::Params<'_, '_>,
        state: AppState,
    ) -> Result<Response<Bytes>, RouterError> {
        match self {
            RouteHandler::Spreadsheet => {
                if req.method() == hyper::Method::POST {
                    handlers::create_spreadsheet(req, params, state).await
                } else if req.method() == hyper::Method::GET {
                    handlers::list_spreadsheets(req, params, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
            RouteHandler::SheetCollection => {
                if req.method() == hyper::Method::POST {
                    handlers::add_sheet(req, params, state).await
                } else if req.method() == hyper::Method::GET {
                    handlers::list_sheets(req, params, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
            RouteHandler::Sheet => {
                if req.method() == hyper::Method::PUT {
                    handlers::rename_sheet(req, params, state).await
                } else if req.method() == hyper::Method::DELETE {
                    handlers::delete_sheet(req, params, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
            RouteHandler::SheetCopy => {
                if req.method() == hyper::Method::POST {
                    handlers::copy_sheet(req, params, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
            RouteHandler::Values => {
                if req.method() == hyper::Method::GET {
                    handlers::read_values(req, params, state).await
                } else if req.method() == hyper::Method::PUT {
                    handlers::write_values(req, params, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
            RouteHandler::Dimensions => {
                if req.method() == hyper::Method::POST {
                    handlers::batch_update_dimensions(req, params, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
        }
    }
}

/// Router error type.
#[derive(Debug)]
pub enum RouterError {
    MethodNotAllowed,
    InternalError(String),
    Timeout,
    BadRequest(String),
    NotFound(String),
}

impl std::fmt::Display for RouterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouterError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            RouterError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
            RouterError::Timeout => write!(f, "Request Timeout"),
            RouterError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            RouterError::NotFound(msg) => write!(f, "Not Found: {}", msg),
        }
    }
}

impl std::error::Error for RouterError {}

impl From<RouterError> for Response<Bytes> {
    fn from(err: RouterError) -> Self {
        let (status, message) = match &err {
            RouterError::MethodNotAllowed => (405, "Method Not Allowed"),
            RouterError::InternalError(msg) => (500, msg.as_str()),
            RouterError::Timeout => (408, "Request Timeout"),
            RouterError::BadRequest(msg) => (400, msg.as_str()),
            RouterError::NotFound(msg) => (404, msg.as_str()),
        };

        let body = crate::handlers::error_body(status, message);

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Bytes::from(body))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(500)
                    .body(Bytes::from("Internal Server Error"))
                    .expect("Failed to build fallback error response")
            })
    }
}
