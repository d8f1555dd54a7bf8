//! # SharePoint Graph client
//!
//! A small, read-only client for the SharePoint list endpoints of Microsoft
//! Graph, authenticated with the OAuth 2.0 client-credential flow.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sharepoint_graph::{GraphClient, GraphResult, ItemsQuery};
//!
//! #[tokio::main]
//! async fn main() -> GraphResult<()> {
//!     let client = GraphClient::builder()
//!         .tenant_id("00000000-0000-0000-0000-000000000000")
//!         .client_id("11111111-1111-1111-1111-111111111111")
//!         .client_secret("app-secret")
//!         .build()?;
//!
//!     let site = client
//!         .sites()
//!         .get_by_path("contoso.sharepoint.com", "/sites/mysite")
//!         .await?;
//!     let site_id = site.id.unwrap_or_default();
//!
//!     if let Some(list) = client.lists().find_by_title(&site_id, "Tasks").await? {
//!         let list_id = list.id.unwrap_or_default();
//!         let items = client
//!             .lists()
//!             .items(&site_id, &list_id, &ItemsQuery::new(10))
//!             .await?;
//!         println!("Fetched {} items", items.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use api::{Collection, ItemsQuery, List, ListItem, Site};
pub use client::{GraphClient, GraphClientBuilder};
pub use config::{ClientConfig, Credentials, RetryConfig};
pub use error::{GraphError, GraphResult};
