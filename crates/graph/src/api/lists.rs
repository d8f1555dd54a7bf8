//! Lists API endpoints.

use super::Collection;
use crate::client::GraphClient;
use crate::error::GraphResult;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Lets `$filter` run against columns that are not indexed.
const PREFER_NON_INDEXED: &str = "HonorNonIndexedQueriesWarningMayFailRandomly";

/// Lists API for SharePoint lists and their items.
pub struct ListsApi<'a> {
    client: &'a GraphClient,
}

impl<'a> ListsApi<'a> {
    pub(crate) fn new(client: &'a GraphClient) -> Self {
        Self { client }
    }

    /// Find a list in a site by its display name.
    ///
    /// The first match carrying a non-empty id wins.
    pub async fn find_by_title(&self, site_id: &str, title: &str) -> GraphResult<Option<List>> {
        let filter = format!("displayName eq '{}'", escape_odata_literal(title));
        let page: Collection<List> = self
            .client
            .http
            .get_with_query(
                &format!("sites/{}/lists", site_id),
                &[("$filter", filter.as_str()), ("$select", "id,displayName")],
            )
            .await?;

        Ok(page
            .value
            .into_iter()
            .find(|list| list.id.as_deref().is_some_and(|id| !id.is_empty())))
    }

    /// Fetch a single page of list items with their field values expanded.
    ///
    /// Continuation links are not followed; at most `query.top` items come back.
    pub async fn items(
        &self,
        site_id: &str,
        list_id: &str,
        query: &ItemsQuery,
    ) -> GraphResult<Vec<ListItem>> {
        let mut params = vec![
            ("$expand", "fields".to_string()),
            ("$top", query.top.to_string()),
        ];
        let mut headers = HeaderMap::new();

        if let Some(filter) = &query.filter {
            params.push(("$filter", filter.clone()));
            headers.insert("Prefer", HeaderValue::from_static(PREFER_NON_INDEXED));
        }

        let page: Collection<ListItem> = self
            .client
            .http
            .get_with_query_and_headers(
                &format!("sites/{}/lists/{}/items", site_id, list_id),
                &params,
                headers,
            )
            .await?;

        if let Some(next_link) = &page.next_link {
            debug!(
                next_link = %next_link,
                returned = page.value.len(),
                "More list items available, returning first page only"
            );
        }

        Ok(page.value)
    }
}

/// Double single quotes so a value can sit inside an OData string literal.
fn escape_odata_literal(value: &str) -> String {
    value.replace('\'', "''")
}

/// Query options for fetching list items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemsQuery {
    /// Maximum number of items to return (`$top`).
    pub top: u32,
    /// Server-side OData filter (`$filter`).
    pub filter: Option<String>,
}

impl ItemsQuery {
    pub fn new(top: u32) -> Self {
        Self { top, filter: None }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

/// A SharePoint list as returned by Graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A list item with its expanded field values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub fields: Option<Map<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryConfig;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SITE_ID: &str = "contoso.sharepoint.com,1111,2222";

    async fn client(server: &MockServer) -> GraphClient {
        Mock::given(method("POST"))
            .and(path("/tenant/oauth2/v2.0/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token_type": "Bearer",
                "expires_in": 3599,
                "access_token": "token"
            })))
            .mount(server)
            .await;

        GraphClient::builder()
            .tenant_id("tenant")
            .client_id("client")
            .client_secret("secret")
            .base_url(format!("{}/v1.0", server.uri()))
            .authority_host(server.uri())
            .retry_config(RetryConfig::no_retry())
            .build()
            .unwrap()
    }

    #[test]
    fn test_escape_odata_literal() {
        assert_eq!(escape_odata_literal("Tasks"), "Tasks");
        assert_eq!(escape_odata_literal("Bob's Tasks"), "Bob''s Tasks");
    }

    #[test]
    fn test_item_without_fields_deserializes() {
        let item: ListItem = serde_json::from_str(r#"{"id":"7"}"#).unwrap();
        assert_eq!(item.id, "7");
        assert!(item.fields.is_none());
    }

    #[test]
    fn test_fields_keep_service_order() {
        let item: ListItem =
            serde_json::from_str(r#"{"id":"1","fields":{"Title":"a","Status":"b","Age":3}}"#)
                .unwrap();
        let keys: Vec<&str> = item.fields.as_ref().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["Title", "Status", "Age"]);
    }

    #[tokio::test]
    async fn test_find_by_title() {
        let server = MockServer::start().await;
        let client = client(&server).await;

        Mock::given(method("GET"))
            .and(path(format!("/v1.0/sites/{}/lists", SITE_ID)))
            .and(query_param("$filter", "displayName eq 'Bob''s Tasks'"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [{"id": "list-1", "displayName": "Bob's Tasks"}]
            })))
            .mount(&server)
            .await;

        let list = client
            .lists()
            .find_by_title(SITE_ID, "Bob's Tasks")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(list.id.as_deref(), Some("list-1"));
    }

    #[tokio::test]
    async fn test_find_by_title_skips_entries_without_id() {
        let server = MockServer::start().await;
        let client = client(&server).await;

        Mock::given(method("GET"))
            .and(path(format!("/v1.0/sites/{}/lists", SITE_ID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [
                    {"displayName": "Tasks"},
                    {"id": "", "displayName": "Tasks"},
                    {"id": "list-2", "displayName": "Tasks"}
                ]
            })))
            .mount(&server)
            .await;

        let list = client
            .lists()
            .find_by_title(SITE_ID, "Tasks")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(list.id.as_deref(), Some("list-2"));
    }

    #[tokio::test]
    async fn test_find_by_title_no_match() {
        let server = MockServer::start().await;
        let client = client(&server).await;

        Mock::given(method("GET"))
            .and(path(format!("/v1.0/sites/{}/lists", SITE_ID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": []
            })))
            .mount(&server)
            .await;

        let list = client.lists().find_by_title(SITE_ID, "Nope").await.unwrap();
        assert!(list.is_none());
    }

    #[tokio::test]
    async fn test_items_single_page() {
        let server = MockServer::start().await;
        let client = client(&server).await;

        Mock::given(method("GET"))
            .and(path(format!("/v1.0/sites/{}/lists/list-1/items", SITE_ID)))
            .and(query_param("$expand", "fields"))
            .and(query_param("$top", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [
                    {"id": "1", "fields": {"Title": "First"}},
                    {"id": "2", "fields": {"Title": "Second"}}
                ],
                "@odata.nextLink": "https://graph.microsoft.com/v1.0/next"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let items = client
            .lists()
            .items(SITE_ID, "list-1", &ItemsQuery::new(2))
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "1");
        assert_eq!(items[1].fields.as_ref().unwrap()["Title"], "Second");
    }

    #[tokio::test]
    async fn test_items_with_server_side_filter() {
        let server = MockServer::start().await;
        let client = client(&server).await;

        Mock::given(method("GET"))
            .and(path(format!("/v1.0/sites/{}/lists/list-1/items", SITE_ID)))
            .and(query_param("$filter", "fields/Status eq 'Active'"))
            .and(query_param("$top", "100"))
            .and(header("Prefer", PREFER_NON_INDEXED))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [{"id": "3", "fields": {"Status": "Active"}}]
            })))
            .mount(&server)
            .await;

        let query = ItemsQuery::new(100).with_filter("fields/Status eq 'Active'");
        let items = client
            .lists()
            .items(SITE_ID, "list-1", &query)
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "3");
    }
}
