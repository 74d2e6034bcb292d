//! Command loop serving the workbook store.
//!
//! Every caller, whether an HTTP handler or the engine's grid backend,
//! talks to the store through [`SheetCommand`] messages with oneshot
//! reply channels. A single [`Runtime`] task owns the store and applies
//! commands in arrival order, which serializes all mutations.

use tokio::sync::oneshot;

use sheet_ops_core::error::SheetError;

mod backend;
mod command;
mod handlers;
mod runtime;

pub use backend::ChannelBackend;
pub use command::SheetCommand;
pub use runtime::Runtime;

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, SheetError>;

/// Reply channel carried by every command
pub type ResponseSender = oneshot::Sender<Result<serde_json::Value>>;
