//! The single-task command loop.

use tokio::sync::mpsc;
use tracing::info;

use sheet_ops_core::config::ServiceConfig;
use sheet_ops_core::store::WorkbookStore;

use crate::command::SheetCommand;
use crate::handlers::CommandHandlers;

/// Owns the workbook store and applies commands in arrival order.
///
/// One loop serializes every mutation, so no two grid calls are ever
/// in flight at once and the engine's sequential-execution contract
/// holds without locks.
pub struct Runtime {
    handlers: CommandHandlers,
    rx: mpsc::Receiver<SheetCommand>,
}

impl Runtime {
    pub fn new(store: WorkbookStore, config: ServiceConfig, rx: mpsc::Receiver<SheetCommand>) -> Self {
        Self {
            handlers: CommandHandlers::new(store, config),
            rx,
        }
    }

    /// Runs until every command sender is dropped.
    pub async fn run(mut self) {
        info!("workbook runtime started");
        while let Some(command) = self.rx.recv().await {
            self.handlers.handle(command);
        }
        info!("workbook runtime stopped");
    }
}
