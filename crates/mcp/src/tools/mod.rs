mod args;
pub mod get_list_items;
mod registry;
pub mod search_list_items;

pub use get_list_items::{GetListItemsTool, GET_LIST_ITEMS};
pub use registry::{json_schema_number, json_schema_object, json_schema_string, Tool, ToolRegistry};
pub use search_list_items::{SearchListItemsTool, SEARCH_LIST_ITEMS};

use crate::directory::DirectoryConnector;
use std::sync::Arc;

/// Registry holding `search_list_items` and `get_list_items`, in that order.
pub fn sharepoint_tools(connector: Arc<dyn DirectoryConnector>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(SearchListItemsTool::new(connector.clone())));
    registry.register(Arc::new(GetListItemsTool::new(connector)));
    registry
}

fn site_url_schema() -> serde_json::Value {
    json_schema_string(
        "The full URL of the SharePoint site, e.g. https://contoso.sharepoint.com/sites/mysite",
    )
}

fn list_title_schema() -> serde_json::Value {
    json_schema_string("The display name of the SharePoint list")
}
