// Errors raised while executing a tool call

use sharepoint_graph::GraphError;

/// Result type for tool execution.
pub type ToolOutcome<T> = Result<T, ToolError>;

/// Failures that abort a tool call.
///
/// A list that cannot be found is not an error; it is reported in-band as a
/// failed `ToolResult`.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The `arguments` payload is not usable at all.
    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    /// A required argument is absent or null.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// An argument is present but has the wrong type.
    #[error("Invalid argument {name}: expected {expected}")]
    InvalidArgument { name: String, expected: &'static str },

    /// The site URL cannot be split into host and path.
    #[error("Invalid site URL '{url}': {reason}")]
    InvalidSiteUrl { url: String, reason: String },

    /// The directory returned no id for the site.
    #[error("Could not resolve site: {0}")]
    SiteNotResolved(String),

    /// Token acquisition, transport or Graph failure.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The tool result could not be rendered.
    #[error("Failed to serialize tool result: {0}")]
    Serialization(#[from] serde_json::Error),
}
