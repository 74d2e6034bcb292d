//! REST API for the spreadsheet operations service.
//!
//! Routes requests to handlers that translate them into runtime
//! commands; the dimension batch endpoint drives the mutation engine.

pub mod handlers;
pub mod router;
pub mod server;
