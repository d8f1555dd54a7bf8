//! Graph API endpoints used for SharePoint list access.

mod lists;
mod sites;

pub use lists::{ItemsQuery, List, ListItem, ListsApi};
pub use sites::{Site, SitesApi};

use serde::{Deserialize, Serialize};

/// A page of a Graph collection response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(
        rename = "@odata.nextLink",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_link: Option<String>,
}
