// Projection of fetched list items into tool results

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sharepoint_graph::ListItem;
use std::borrow::Cow;

/// A list item as returned to the caller: its id and its open field record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItemResult {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl From<ListItem> for ListItemResult {
    fn from(item: ListItem) -> Self {
        Self {
            id: item.id,
            fields: item.fields.unwrap_or_default(),
        }
    }
}

/// Body of a tool call, rendered as pretty JSON into the text content block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ListItemResult>>,
}

impl ToolResult {
    pub fn items(items: Vec<ListItemResult>) -> Self {
        Self {
            success: Some(true),
            error: None,
            count: Some(items.len()),
            items: Some(items),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn list_not_found() -> Self {
        Self::failure("List not found")
    }

    /// Bare `{"error": "Unknown tool"}`, without a success flag.
    pub fn unknown_tool() -> Self {
        Self {
            error: Some("Unknown tool".to_string()),
            ..Default::default()
        }
    }
}

/// Every fetched item, unchanged.
pub fn pass_through(items: Vec<ListItem>) -> Vec<ListItemResult> {
    items.into_iter().map(ListItemResult::from).collect()
}

/// Items with at least one field value containing `query`, ignoring case.
///
/// Only values are inspected, never field names. Items without field data
/// never match.
pub fn search(items: Vec<ListItem>, query: &str) -> Vec<ListItemResult> {
    let needle = query.to_lowercase();

    items
        .into_iter()
        .filter_map(|item| {
            let fields = item.fields?;
            fields
                .values()
                .any(|value| value_text(value).to_lowercase().contains(&needle))
                .then_some(ListItemResult {
                    id: item.id,
                    fields,
                })
        })
        .collect()
}

/// Text form of a field value: strings as-is, everything else as compact JSON.
fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(text) => Cow::Borrowed(text),
        other => Cow::Owned(other.to_string()),
    }
}
