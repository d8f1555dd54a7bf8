use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

mod api;
mod config;

use config::{CredentialOverrides, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "sharepoint-mcp")]
#[command(about = "SharePoint list tools over the MCP tool protocol", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "sharepoint-mcp.toml")]
    config: PathBuf,

    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Directory (tenant) id of the app registration
    #[arg(long, env = "AZURE_TENANT_ID")]
    tenant_id: Option<String>,

    /// Application (client) id of the app registration
    #[arg(long, env = "AZURE_CLIENT_ID")]
    client_id: Option<String>,

    /// Client secret of the app registration
    #[arg(long, env = "AZURE_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "sharepoint_server=info,sharepoint_mcp=info,sharepoint_graph=info,tower_http=debug".into()
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(args.log_format);

    tracing::info!("Starting SharePoint MCP server");

    // Load configuration, credentials from CLI/env win over the file
    let config = ServerConfig::load(&args.config)?.with_overrides(CredentialOverrides {
        tenant_id: args.tenant_id,
        client_id: args.client_id,
        client_secret: args.client_secret,
    });

    if !config.has_credentials() {
        tracing::warn!(
            "Graph credentials are incomplete; tool calls will fail until AZURE_TENANT_ID, AZURE_CLIENT_ID and AZURE_CLIENT_SECRET are set"
        );
    }

    // Start API server
    let addr = format!("{}:{}", args.host, args.port);
    tracing::info!("Starting API server on {}", addr);

    api::serve(&addr, config).await?;

    Ok(())
}
