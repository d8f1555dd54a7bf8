// Site and list resolution followed by a single-page item fetch

use crate::directory::ListDirectory;
use crate::error::{ToolError, ToolOutcome};
use sharepoint_graph::{ItemsQuery, ListItem};
use tracing::debug;
use url::Url;

/// Host and server-relative path of a SharePoint site URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteAddress {
    pub hostname: String,
    pub path: String,
}

impl SiteAddress {
    pub fn parse(site_url: &str) -> ToolOutcome<Self> {
        let invalid = |reason: String| ToolError::InvalidSiteUrl {
            url: site_url.to_string(),
            reason,
        };

        let url = Url::parse(site_url).map_err(|e| invalid(e.to_string()))?;
        let hostname = url
            .host_str()
            .ok_or_else(|| invalid("URL has no host".to_string()))?
            .to_string();

        let path = match url.path().trim_end_matches('/') {
            "" => "/".to_string(),
            trimmed => trimmed.to_string(),
        };

        Ok(Self { hostname, path })
    }

    /// Composite lookup key, `{host}:{path}`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.hostname, self.path)
    }
}

/// Resolve a site URL to its id. A missing id is an error.
pub async fn resolve_site(directory: &dyn ListDirectory, site_url: &str) -> ToolOutcome<String> {
    let address = SiteAddress::parse(site_url)?;
    debug!(site = %address.key(), "Resolving site");

    directory
        .site_id(&address.hostname, &address.path)
        .await?
        .ok_or_else(|| ToolError::SiteNotResolved(site_url.to_string()))
}

/// Resolve a list title within a site. `None` means the list does not exist.
pub async fn resolve_list(
    directory: &dyn ListDirectory,
    site_id: &str,
    list_title: &str,
) -> ToolOutcome<Option<String>> {
    debug!(site_id = %site_id, list = %list_title, "Resolving list");
    Ok(directory.list_id(site_id, list_title).await?)
}

/// Resolve site and list, then fetch one page of items.
///
/// Returns `Ok(None)` when the list cannot be found.
pub async fn fetch_list_items(
    directory: &dyn ListDirectory,
    site_url: &str,
    list_title: &str,
    query: &ItemsQuery,
) -> ToolOutcome<Option<Vec<ListItem>>> {
    let site_id = resolve_site(directory, site_url).await?;

    let Some(list_id) = resolve_list(directory, &site_id, list_title).await? else {
        return Ok(None);
    };

    let items = directory.items(&site_id, &list_id, query).await?;
    debug!(
        list = %list_title,
        fetched = items.len(),
        top = query.top,
        "Fetched list items"
    );

    Ok(Some(items))
}
