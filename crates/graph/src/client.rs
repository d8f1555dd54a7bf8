//! Main client for the Graph API.

use crate::api::*;
use crate::config::{with_trailing_slash, ClientConfig, Credentials, RetryConfig};
use crate::error::{GraphError, GraphResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Authenticated client for the SharePoint parts of Microsoft Graph.
///
/// Cloning is cheap and clones share the cached access token.
#[derive(Clone)]
pub struct GraphClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl GraphClient {
    /// Create a new client builder.
    pub fn builder() -> GraphClientBuilder {
        GraphClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> GraphResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// The configuration the client was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the sites API.
    pub fn sites(&self) -> SitesApi<'_> {
        SitesApi::new(self)
    }

    /// Get the lists API.
    pub fn lists(&self) -> ListsApi<'_> {
        ListsApi::new(self)
    }
}

/// Builder for creating a GraphClient.
pub struct GraphClientBuilder {
    tenant_id: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    base_url: Option<String>,
    authority_host: Option<String>,
    timeout: Duration,
    retry_config: RetryConfig,
}

impl GraphClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            tenant_id: None,
            client_id: None,
            client_secret: None,
            base_url: None,
            authority_host: None,
            timeout: Duration::from_secs(30),
            retry_config: RetryConfig::default(),
        }
    }

    /// Set the directory (tenant) id of the app registration.
    pub fn tenant_id(mut self, id: impl Into<String>) -> Self {
        self.tenant_id = Some(id.into());
        self
    }

    /// Set the application (client) id.
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self
    }

    /// Set the client secret.
    pub fn client_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    /// Override the Graph API root (national clouds, tests).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Override the identity platform authority.
    pub fn authority_host(mut self, url: impl Into<String>) -> Self {
        self.authority_host = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry configuration.
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Build the client.
    pub fn build(self) -> GraphResult<GraphClient> {
        let credentials = Credentials {
            tenant_id: required(self.tenant_id, "tenant_id")?,
            client_id: required(self.client_id, "client_id")?,
            client_secret: required(self.client_secret, "client_secret")?,
        };

        let mut config = ClientConfig::new(credentials);
        config.timeout = self.timeout;
        config.retry_config = self.retry_config;

        if let Some(base_url) = self.base_url {
            config.base_url = with_trailing_slash(Url::parse(&base_url)?);
        }
        if let Some(authority_host) = self.authority_host {
            config.authority_host = with_trailing_slash(Url::parse(&authority_host)?);
        }

        GraphClient::from_config(config)
    }
}

impl Default for GraphClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn required(value: Option<String>, name: &str) -> GraphResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| GraphError::Config(format!("{} is required", name)))
}
