use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sharepoint_mcp::{GraphConnector, GraphSettings, McpServer};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub graph: GraphSettings,
}

/// Credential values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct CredentialOverrides {
    pub tenant_id: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl ServerConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        // Load config file if it exists, otherwise use defaults
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .context("Failed to read configuration file")?;
            toml::from_str(&content).context("Failed to parse configuration file")
        } else {
            tracing::info!(
                "Configuration file {} not found, using defaults",
                config_path.display()
            );
            Ok(Self::default())
        }
    }

    /// Overlay CLI/environment credentials on top of the file values.
    pub fn with_overrides(mut self, overrides: CredentialOverrides) -> Self {
        if overrides.tenant_id.is_some() {
            self.graph.tenant_id = overrides.tenant_id;
        }
        if overrides.client_id.is_some() {
            self.graph.client_id = overrides.client_id;
        }
        if overrides.client_secret.is_some() {
            self.graph.client_secret = overrides.client_secret;
        }
        self
    }

    /// Whether all three credentials are present; calls fail without them.
    pub fn has_credentials(&self) -> bool {
        [
            &self.graph.tenant_id,
            &self.graph.client_id,
            &self.graph.client_secret,
        ]
        .iter()
        .all(|value| value.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub mcp: Arc<McpServer>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        let connector = Arc::new(GraphConnector::new(config.graph.clone()));
        Self {
            mcp: Arc::new(McpServer::sharepoint(connector)),
        }
    }
}
