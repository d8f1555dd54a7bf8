// In-memory directory used by the unit tests

use crate::directory::{DirectoryConnector, ListDirectory};
use crate::error::ToolOutcome;
use serde_json::Value;
use sharepoint_graph::{GraphResult, ItemsQuery, ListItem};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct FakeDirectory {
    sites: HashMap<String, String>,
    lists: HashMap<(String, String), String>,
    items: HashMap<String, Vec<ListItem>>,
    queries: Mutex<Vec<ItemsQuery>>,
}

impl FakeDirectory {
    pub fn with_site(key: &str, site_id: &str) -> Self {
        let mut directory = Self::default();
        directory.sites.insert(key.to_string(), site_id.to_string());
        directory
    }

    /// Add a list whose items get ids `1..=n`; a `null` entry is an item without fields.
    pub fn with_list(mut self, site_id: &str, title: &str, list_id: &str, fields: Vec<Value>) -> Self {
        self.lists
            .insert((site_id.to_string(), title.to_string()), list_id.to_string());

        let items = fields
            .into_iter()
            .enumerate()
            .map(|(index, fields)| ListItem {
                id: (index + 1).to_string(),
                fields: match fields {
                    Value::Object(map) => Some(map),
                    _ => None,
                },
            })
            .collect();
        self.items.insert(list_id.to_string(), items);
        self
    }

    pub fn last_query(&self) -> Option<ItemsQuery> {
        self.queries.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl ListDirectory for FakeDirectory {
    async fn site_id(&self, hostname: &str, path: &str) -> GraphResult<Option<String>> {
        Ok(self.sites.get(&format!("{}:{}", hostname, path)).cloned())
    }

    async fn list_id(&self, site_id: &str, title: &str) -> GraphResult<Option<String>> {
        Ok(self
            .lists
            .get(&(site_id.to_string(), title.to_string()))
            .cloned())
    }

    async fn items(
        &self,
        _site_id: &str,
        list_id: &str,
        query: &ItemsQuery,
    ) -> GraphResult<Vec<ListItem>> {
        self.queries.lock().unwrap().push(query.clone());

        Ok(self
            .items
            .get(list_id)
            .map(|items| items.iter().take(query.top as usize).cloned().collect())
            .unwrap_or_default())
    }
}

pub struct FakeConnector {
    pub directory: Arc<FakeDirectory>,
}

impl FakeConnector {
    pub fn new(directory: FakeDirectory) -> Self {
        Self {
            directory: Arc::new(directory),
        }
    }
}

impl DirectoryConnector for FakeConnector {
    fn connect(&self) -> ToolOutcome<Arc<dyn ListDirectory>> {
        Ok(self.directory.clone())
    }
}
