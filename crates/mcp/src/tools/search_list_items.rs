// search_list_items: fetch a page of list items and keep those matching a query

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

pub const SEARCH_LIST_ITEMS: &str = "search_list_items";

/// Default fetch window when `maxResults` is not given.
pub const DEFAULT_SEARCH_RESULTS: u32 = 50;

/// Tool searching list items by substring across all field values.
///
/// Matching runs on the fetched page only: at most `maxResults` items are
/// fetched and the query is applied to those, so a list with more items may
/// hold matches that are never seen.
pub struct SearchListItemsTool {
    connector: Arc<dyn DirectoryConnector>,
}

impl SearchListItemsTool {
    pub fn new(connector: Arc<dyn DirectoryConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait::async_trait]
impl Tool for SearchListItemsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: SEARCH_LIST_ITEMS.to_string(),
            description: "Search for items in a SharePoint list by matching a query against all field values".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "siteUrl": site_url_schema(),
                    "listTitle": list_title_schema(),
                    "searchQuery": json_schema_string("Text to search for in list item fields (case-insensitive)"),
                    "maxResults": json_schema_number("Maximum number of items to retrieve", DEFAULT_SEARCH_RESULTS)
                }),
                vec!["siteUrl", "listTitle", "searchQuery"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> ToolOutcome<ToolResult> {
        let args = Arguments::new(SEARCH_LIST_ITEMS, &arguments)?;
        let site_url = args.required_str("siteUrl")?;
        let list_title = args.required_str("listTitle")?;
        let search_query = args.required_str("searchQuery")?;
        let max_results = args.count_or("maxResults", DEFAULT_SEARCH_RESULTS)?;

        let directory = self.connector.connect()?;
        let query = ItemsQuery::new(max_results);
        let Some(items) = fetch_list_items(directory.as_ref(), site_url, list_title, &query).await?
        else {
            info!(list = %list_title, "List not found");
            return Ok(ToolResult::list_not_found());
        };

        let fetched = items.len();
        let matches = shape::search(items, search_query);
        info!(
            list = %list_title,
            fetched = fetched,
            matched = matches.len(),
            "Searched list items"
        );

        Ok(ToolResult::items(matches))
    }
}
