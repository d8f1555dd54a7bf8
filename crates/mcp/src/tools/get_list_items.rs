// get_list_items: fetch a page of list items, optionally filtered server-side

use super::args::Arguments;
use super::{list_title_schema, site_url_schema};
use crate::directory::DirectoryConnector;
use crate::error::ToolOutcome;
use crate::lookup::fetch_list_items;
use crate::protocol::ToolSchema;
use crate::shape::{self, ToolResult};
use crate::tools::{json_schema_number, json_schema_object, json_schema_string, Tool};
use sharepoint_graph::ItemsQuery;
use std::sync::Arc;
use tracing::info;

pub const GET_LIST_ITEMS: &str = "get_list_items";

/// Default page size when `maxResults` is not given.
pub const DEFAULT_GET_RESULTS: u32 = 100;

/// Tool returning list items as stored, with an optional OData filter
pub struct GetListItemsTool {
    connector: Arc<dyn DirectoryConnector>,
}

impl GetListItemsTool {
    pub fn new(connector: Arc<dyn DirectoryConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait::async_trait]
impl Tool for GetListItemsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: GET_LIST_ITEMS.to_string(),
            description: "Get items from a SharePoint list with optional OData filtering".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "siteUrl": site_url_schema(),
                    "listTitle": list_title_schema(),
                    "filter": json_schema_string("Optional OData filter expression, e.g. fields/Status eq 'Active'"),
                    "maxResults": json_schema_number("Maximum number of items to retrieve", DEFAULT_GET_RESULTS)
                }),
                vec!["siteUrl", "listTitle"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> ToolOutcome<ToolResult> {
        let args = Arguments::new(GET_LIST_ITEMS, &arguments)?;
        let site_url = args.required_str("siteUrl")?;
        let list_title = args.required_str("listTitle")?;
        let filter = args.optional_str("filter")?.filter(|f| !f.trim().is_empty());
        let max_results = args.count_or("maxResults", DEFAULT_GET_RESULTS)?;

        let mut query = ItemsQuery::new(max_results);
        if let Some(filter) = filter {
            query = query.with_filter(filter);
        }

        let directory = self.connector.connect()?;
        let Some(items) = fetch_list_items(directory.as_ref(), site_url, list_title, &query).await?
        else {
            info!(list = %list_title, "List not found");
            return Ok(ToolResult::list_not_found());
        };

        Ok(ToolResult::items(shape::pass_through(items)))
    }
}
