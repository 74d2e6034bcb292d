//! Command handlers applying requests to the workbook store.

use serde_json::{json, Value};
use tracing::info;

use sheet_ops_core::config::ServiceConfig;
use sheet_ops_core::error::SheetError;
use sheet_ops_core::store::WorkbookStore;

use crate::command::SheetCommand;
use crate::Result;

/// Applies commands to the store and sends replies.
pub struct CommandHandlers {
    store: WorkbookStore,
    config: ServiceConfig,
}

impl CommandHandlers {
    pub fn new(store: WorkbookStore, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// Handles one command, replying on its oneshot channel.
    ///
    /// A dropped receiver is not an error; the caller timed out or went
    /// away and the reply is discarded.
    pub fn handle(&mut self, command: SheetCommand) {
        match command {
            SheetCommand::CreateSpreadsheet { title, response } => {
                info!(title = %title, "creating spreadsheet");
                let meta = self.store.create_spreadsheet(
                    title,
                    self.config.default_rows,
                    self.config.default_columns,
                );
                let _ = response.send(to_value(&meta));
            }
            SheetCommand::ListSpreadsheets { response } => {
                let result = to_value(&self.store.list_spreadsheets())
                    .map(|spreadsheets| json!({ "spreadsheets": spreadsheets }));
                let _ = response.send(result);
            }
            SheetCommand::AddSheet {
                spreadsheet_id,
                title,
                rows,
                columns,
                response,
            } => {
                info!(spreadsheet = %spreadsheet_id, title = %title, "adding sheet");
                let result = self
                    .store
                    .add_sheet(
                        &spreadsheet_id,
                        title,
                        rows.unwrap_or(self.config.default_rows),
                        columns.unwrap_or(self.config.default_columns),
                    )
                    .and_then(|meta| to_value(&meta));
                let _ = response.send(result);
            }
            SheetCommand::DeleteSheet {
                spreadsheet_id,
                sheet_id,
                response,
            } => {
                info!(spreadsheet = %spreadsheet_id, sheet = sheet_id, "deleting sheet");
                let result = self
                    .store
                    .delete_sheet(&spreadsheet_id, sheet_id)
                    .map(|()| json!({ "deleted": true }));
                let _ = response.send(result);
            }
            SheetCommand::CopySheet {
                spreadsheet_id,
                sheet_id,
                new_title,
                response,
            } => {
                info!(spreadsheet = %spreadsheet_id, sheet = sheet_id, "copying sheet");
                let result = self
                    .store
                    .copy_sheet(&spreadsheet_id, sheet_id, new_title)
                    .and_then(|meta| to_value(&meta));
                let _ = response.send(result);
            }
            SheetCommand::RenameSheet {
                spreadsheet_id,
                sheet_id,
                title,
                response,
            } => {
                let result = self
                    .store
                    .rename_sheet(&spreadsheet_id, sheet_id, title)
                    .and_then(|meta| to_value(&meta));
                let _ = response.send(result);
            }
            SheetCommand::ListSheets {
                spreadsheet_id,
                response,
            } => {
                let result = self
                    .store
                    .list_sheets(&spreadsheet_id)
                    .and_then(|metas| to_value(&metas))
                    .map(|sheets| json!({ "sheets": sheets }));
                let _ = response.send(result);
            }
            SheetCommand::SheetMeta {
                spreadsheet_id,
                sheet_id,
                response,
            } => {
                let result = self
                    .store
                    .sheet_meta(&spreadsheet_id, sheet_id)
                    .and_then(|(spreadsheet, sheet)| {
                        Ok(json!({
                            "spreadsheet": to_value(&spreadsheet)?,
                            "sheet": to_value(&sheet)?,
                        }))
                    });
                let _ = response.send(result);
            }
            SheetCommand::GridSize {
                spreadsheet_id,
                sheet_id,
                response,
            } => {
                let result = self
                    .store
                    .grid_size(&spreadsheet_id, sheet_id)
                    .map(|state| {
                        json!({
                            "rows": state.row_count,
                            "columns": state.column_count,
                        })
                    });
                let _ = response.send(result);
            }
            SheetCommand::MutateDimension {
                spreadsheet_id,
                sheet_id,
                op,
                response,
            } => {
                let result = self
                    .store
                    .apply_dimension(&spreadsheet_id, sheet_id, &op)
                    .map(|affected| json!({ "affected": affected }));
                let _ = response.send(result);
            }
            SheetCommand::ReadRange {
                spreadsheet_id,
                sheet_id,
                range,
                response,
            } => {
                let result = self
                    .store
                    .read_range(&spreadsheet_id, sheet_id, &range)
                    .and_then(|values| {
                        Ok(json!({
                            "range": range.to_string(),
                            "values": to_value(&values)?,
                        }))
                    });
                let _ = response.send(result);
            }
            SheetCommand::WriteRange {
                spreadsheet_id,
                sheet_id,
                range,
                values,
                response,
            } => {
                let result = self
                    .store
                    .write_range(&spreadsheet_id, sheet_id, &range, values)
                    .map(|written| json!({ "updatedCells": written }));
                let _ = response.send(result);
            }
        }
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| SheetError::Serialization(e.to_string()))
}
