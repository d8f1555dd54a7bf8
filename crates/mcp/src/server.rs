// Protocol dispatcher: initialize, tools/list and tools/call

use crate::directory::DirectoryConnector;
use crate::error::ToolOutcome;
use crate::protocol::{
    CallToolParams, CallToolResult, InitializeResult, ListToolsResult, ServerCapabilities,
    ServerInfo, PROTOCOL_VERSION,
};
use crate::shape::ToolResult;
use crate::tools::{sharepoint_tools, ToolRegistry};
use std::sync::Arc;
use tracing::{info, warn};

/// Name announced in `serverInfo`.
pub const SERVER_NAME: &str = "sharepoint-mcp";

pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Server exposing the SharePoint list tools.
    pub fn sharepoint(connector: Arc<dyn DirectoryConnector>) -> Self {
        Self::new(sharepoint_tools(connector))
    }

    pub fn initialize(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            capabilities: ServerCapabilities::default(),
        }
    }

    pub fn list_tools(&self) -> ListToolsResult {
        ListToolsResult {
            tools: self.registry.list_schemas(),
        }
    }

    /// Dispatch a call by tool name.
    ///
    /// An unknown tool is answered in-band; every other failure is returned as
    /// an error for the transport to render.
    pub async fn call_tool(&self, params: CallToolParams) -> ToolOutcome<CallToolResult> {
        let Some(tool) = self.registry.get(&params.name) else {
            warn!(tool = %params.name, "Unknown tool requested");
            return Ok(CallToolResult::json(&ToolResult::unknown_tool())?);
        };

        info!(tool = %params.name, "Calling tool");
        let result = tool.execute(params.arguments).await?;
        Ok(CallToolResult::json(&result)?)
    }
}
