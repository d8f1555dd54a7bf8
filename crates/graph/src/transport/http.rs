//! HTTP transport layer for the Graph client.

use crate::auth::TokenProvider;
use crate::config::ClientConfig;
use crate::error::{GraphError, GraphResult};
use reqwest::{header, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Correlation header Graph echoes back in its diagnostics.
const CLIENT_REQUEST_ID: &str = "client-request-id";

/// Authenticated HTTP transport for Graph requests.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
    tokens: Arc<TokenProvider>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> GraphResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("sharepoint-mcp/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        let tokens = Arc::new(TokenProvider::new(client.clone(), &config)?);

        Ok(Self {
            client,
            config,
            tokens,
        })
    }

    /// Build a URL for the given path, relative to the Graph root.
    fn build_url(&self, path: &str) -> GraphResult<url::Url> {
        self.config
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(GraphError::InvalidUrl)
    }

    /// Execute a request with a bearer token, retrying throttled and failed attempts.
    async fn execute_with_retry(&self, request_builder: RequestBuilder) -> GraphResult<Response> {
        let retry_config = &self.config.retry_config;
        let mut attempts = 0;

        loop {
            let token = self.tokens.token().await?;
            let request = request_builder
                .try_clone()
                .ok_or_else(|| GraphError::Config("Request cannot be cloned".to_string()))?
                .bearer_auth(token)
                .header(CLIENT_REQUEST_ID, uuid::Uuid::new_v4().to_string());

            match request.send().await {
                Ok(response) => {
                    let status = response.status().as_u16();

                    if response.status().is_success() {
                        return Ok(response);
                    }

                    let retry_after = retry_after(&response);

                    if attempts < retry_config.max_retries
                        && retry_config.should_retry_status(status)
                    {
                        let backoff = retry_config.backoff_with_hint(attempts, retry_after);
                        warn!(
                            status = status,
                            attempt = attempts + 1,
                            backoff_ms = backoff.as_millis(),
                            "Graph request failed, retrying"
                        );
                        tokio::time::sleep(backoff).await;
                        attempts += 1;
                        continue;
                    }

                    if status == 429 {
                        return Err(GraphError::RateLimited {
                            retry_after_secs: retry_after.map(|d| d.as_secs()),
                        });
                    }

                    let body = response.text().await.unwrap_or_default();
                    return Err(GraphError::from_response(status, &body));
                }
                Err(e) => {
                    if attempts < retry_config.max_retries && (e.is_timeout() || e.is_connect()) {
                        let backoff = retry_config.backoff_for_attempt(attempts);
                        warn!(
                            attempt = attempts + 1,
                            backoff_ms = backoff.as_millis(),
                            error = %e,
                            "Graph request did not complete, retrying"
                        );
                        tokio::time::sleep(backoff).await;
                        attempts += 1;
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }
    }

    /// Execute a GET request with query parameters.
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> GraphResult<T> {
        self.get_with_query_and_headers(path, query, header::HeaderMap::new())
            .await
    }

    /// Execute a GET request with query parameters and extra request headers.
    pub async fn get_with_query_and_headers<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
        headers: header::HeaderMap,
    ) -> GraphResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request with query");

        let response = self
            .execute_with_retry(self.client.get(url).query(query).headers(headers))
            .await?;
        let body = response.json().await?;
        Ok(body)
    }
}

/// Parse a delay-seconds `Retry-After` header.
fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
