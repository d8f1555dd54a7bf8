// SharePoint list tools over the MCP tool-invocation protocol

pub mod directory;
pub mod error;
pub mod lookup;
pub mod protocol;
pub mod server;
pub mod shape;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

pub use directory::{DirectoryConnector, GraphConnector, GraphSettings, ListDirectory};
pub use error::{ToolError, ToolOutcome};
pub use server::McpServer;
pub use shape::{ListItemResult, ToolResult};
