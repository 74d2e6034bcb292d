//! HTTP endpoint implementations for spreadsheet, sheet, value, and
//! dimension operations.

mod dimension_handlers;
mod request_utils;
mod response;
mod sheet_handlers;
mod value_handlers;

pub use dimension_handlers::batch_update_dimensions;
pub use response::{error_body, success_body};
pub use sheet_handlers::{
    add_sheet, copy_sheet, create_spreadsheet, delete_sheet, list_sheets, list_spreadsheets,
    rename_sheet,
};
pub use value_handlers::{read_values, write_values};
