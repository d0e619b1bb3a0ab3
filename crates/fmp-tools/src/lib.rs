//! Financial Modeling Prep lookups exposed as MCP tools
//!
//! Each [`Operation`] validates its arguments, emits an info trace entry and
//! forwards one request through the shared [`fmp_gateway::Gateway`].
//! [`FmpServer`] adapts the [`ToolRegistry`] to the MCP protocol.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod args;
mod error;
mod handler;
mod operation;
mod registry;

pub use error::ToolError;
pub use handler::{FmpServer, INSTRUCTIONS, SERVER_NAME};
pub use operation::Operation;
pub use registry::{OperationDefinition, ToolRegistry};
