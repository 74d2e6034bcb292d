//! Domain types and in-memory workbook store for the spreadsheet
//! operations service.
//!
//! Provides the grid size/dimension vocabulary shared by every crate in
//! the workspace, A1 range handling, the error taxonomy, and the store
//! that backs the grid-mutation API.

pub mod config;
pub mod error;
pub mod grid;
pub mod ops;
pub mod range;
pub mod store;
