// Directory access seam: what the tools need from the remote list service

use crate::error::ToolOutcome;
use serde::{Deserialize, Serialize};
use sharepoint_graph::{GraphClient, GraphClientBuilder, GraphResult, ItemsQuery, ListItem, RetryConfig};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

/// Read-only view of the remote list service.
#[async_trait::async_trait]
pub trait ListDirectory: Send + Sync {
    /// Resolve `{hostname}:{path}` to a site id.
    async fn site_id(&self, hostname: &str, path: &str) -> GraphResult<Option<String>>;

    /// Resolve a list title within a site to a list id.
    async fn list_id(&self, site_id: &str, title: &str) -> GraphResult<Option<String>>;

    /// Fetch one page of items with expanded fields.
    async fn items(
        &self,
        site_id: &str,
        list_id: &str,
        query: &ItemsQuery,
    ) -> GraphResult<Vec<ListItem>>;
}

/// Produces a directory handle for one tool call.
pub trait DirectoryConnector: Send + Sync {
    fn connect(&self) -> ToolOutcome<Arc<dyn ListDirectory>>;
}

#[async_trait::async_trait]
impl ListDirectory for GraphClient {
    async fn site_id(&self, hostname: &str, path: &str) -> GraphResult<Option<String>> {
        let site = self.sites().get_by_path(hostname, path).await?;
        Ok(site.id.filter(|id| !id.is_empty()))
    }

    async fn list_id(&self, site_id: &str, title: &str) -> GraphResult<Option<String>> {
        let list = self.lists().find_by_title(site_id, title).await?;
        Ok(list.and_then(|list| list.id).filter(|id| !id.is_empty()))
    }

    async fn items(
        &self,
        site_id: &str,
        list_id: &str,
        query: &ItemsQuery,
    ) -> GraphResult<Vec<ListItem>> {
        self.lists().items(site_id, list_id, query).await
    }
}

/// Graph connection settings, usually the `[graph]` table of the server config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSettings {
    #[serde(default)]
    pub tenant_id: Option<String>,

    #[serde(default)]
    pub client_id: Option<String>,

    #[serde(default, skip_serializing)]
    pub client_secret: Option<String>,

    /// Identity platform authority, defaults to the public cloud.
    #[serde(default)]
    pub authority_host: Option<String>,

    /// Graph API root, defaults to `https://graph.microsoft.com/v1.0`.
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub max_retries: Option<u32>,

    /// Share one client (and its token) across calls instead of building one per call.
    #[serde(default)]
    pub reuse_client: bool,
}

impl GraphSettings {
    /// Builder carrying every configured value; credentials are checked on `build()`.
    pub fn client_builder(&self) -> GraphClientBuilder {
        let mut builder = GraphClient::builder();

        if let Some(tenant_id) = &self.tenant_id {
            builder = builder.tenant_id(tenant_id);
        }
        if let Some(client_id) = &self.client_id {
            builder = builder.client_id(client_id);
        }
        if let Some(client_secret) = &self.client_secret {
            builder = builder.client_secret(client_secret);
        }
        if let Some(authority_host) = &self.authority_host {
            builder = builder.authority_host(authority_host);
        }
        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(timeout_secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        if let Some(max_retries) = self.max_retries {
            builder = builder.retry_config(RetryConfig {
                max_retries,
                ..Default::default()
            });
        }

        builder
    }
}

/// Builds Graph clients from settings, one per call unless reuse is enabled.
pub struct GraphConnector {
    settings: GraphSettings,
    shared: OnceLock<GraphClient>,
}

impl GraphConnector {
    pub fn new(settings: GraphSettings) -> Self {
        Self {
            settings,
            shared: OnceLock::new(),
        }
    }

    fn client(&self) -> GraphResult<GraphClient> {
        if !self.settings.reuse_client {
            return self.settings.client_builder().build();
        }

        if let Some(client) = self.shared.get() {
            return Ok(client.clone());
        }

        let client = self.settings.client_builder().build()?;
        Ok(self.shared.get_or_init(|| client).clone())
    }
}

impl DirectoryConnector for GraphConnector {
    fn connect(&self) -> ToolOutcome<Arc<dyn ListDirectory>> {
        Ok(Arc::new(self.client()?))
    }
}
