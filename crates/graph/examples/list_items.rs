//! Fetch the first items of a SharePoint list.
//!
//! Reads credentials from `AZURE_TENANT_ID`, `AZURE_CLIENT_ID` and
//! `AZURE_CLIENT_SECRET`.
//!
//! Run with: cargo run --example list_items -- contoso.sharepoint.com /sites/mysite Tasks

use sharepoint_graph::{GraphClient, GraphError, GraphResult, ItemsQuery};

#[tokio::main]
async fn main() -> GraphResult<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let (Some(hostname), Some(site_path), Some(list_title)) = (args.next(), args.next(), args.next())
    else {
        eprintln!("usage: list_items <hostname> <site-path> <list-title>");
        return Ok(());
    };

    let env = |name: &str| std::env::var(name).unwrap_or_default();
    let client = GraphClient::builder()
        .tenant_id(env("AZURE_TENANT_ID"))
        .client_id(env("AZURE_CLIENT_ID"))
        .client_secret(env("AZURE_CLIENT_SECRET"))
        .build()?;

    let site = client.sites().get_by_path(&hostname, &site_path).await?;
    let site_id = site
        .id
        .ok_or_else(|| GraphError::NotFound(format!("{}{}", hostname, site_path)))?;
    println!("Site: {}", site_id);

    let Some(list_id) = client
        .lists()
        .find_by_title(&site_id, &list_title)
        .await?
        .and_then(|list| list.id)
    else {
        println!("List '{}' not found", list_title);
        return Ok(());
    };

    let items = client
        .lists()
        .items(&site_id, &list_id, &ItemsQuery::new(10))
        .await?;

    println!("Fetched {} items", items.len());
    for item in &items {
        let title = item
            .fields
            .as_ref()
            .and_then(|fields| fields.get("Title"))
            .and_then(|title| title.as_str())
            .unwrap_or("<untitled>");
        println!("  {}: {}", item.id, title);
    }

    Ok(())
}
