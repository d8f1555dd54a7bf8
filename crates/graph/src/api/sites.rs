//! Sites API endpoints.

use crate::client::GraphClient;
use crate::error::GraphResult;
use serde::{Deserialize, Serialize};

/// Sites API for resolving SharePoint sites.
pub struct SitesApi<'a> {
    client: &'a GraphClient,
}

impl<'a> SitesApi<'a> {
    pub(crate) fn new(client: &'a GraphClient) -> Self {
        Self { client }
    }

    /// Look up a site by hostname and server-relative path, e.g.
    /// `contoso.sharepoint.com` and `/sites/mysite`.
    pub async fn get_by_path(&self, hostname: &str, server_relative_path: &str) -> GraphResult<Site> {
        let path = format!("sites/{}:{}", hostname, server_relative_path);
        self.client
            .http
            .get_with_query(&path, &[("$select", "id,displayName,webUrl")])
            .await
    }
}

/// A SharePoint site as returned by Graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
}
