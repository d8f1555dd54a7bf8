//! Error types for the Graph client.

use serde::Deserialize;

/// Result type for Graph client operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Error types that can occur when talking to Microsoft Graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Graph returned an error response.
    #[error("Graph API error (status {status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Invalid or incomplete client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Token acquisition failed or the token was rejected.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limited and out of retries.
    #[error("Rate limited{}", retry_hint(.retry_after_secs))]
    RateLimited { retry_after_secs: Option<u64> },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl GraphError {
    /// Create an error from a Graph status code and response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let (code, message) = match serde_json::from_str::<GraphErrorResponse>(body) {
            Ok(response) => (response.error.code, response.error.message),
            Err(_) => (None, body.to_string()),
        };

        match status {
            401 | 403 => Self::Authentication(message),
            404 => Self::NotFound(message),
            _ => Self::Api {
                status,
                code,
                message,
            },
        }
    }

    /// Create an error from a failed token endpoint response.
    pub fn from_token_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<TokenErrorResponse>(body) {
            Ok(response) => Self::Authentication(
                response
                    .error_description
                    .unwrap_or_else(|| format!("{} (status {})", response.error, status)),
            ),
            Err(_) => Self::Authentication(format!("token endpoint returned status {}", status)),
        }
    }
}

fn retry_hint(retry_after_secs: &Option<u64>) -> String {
    retry_after_secs
        .map(|secs| format!(", retry after {} seconds", secs))
        .unwrap_or_default()
}

/// Error envelope returned by Graph.
#[derive(Debug, Deserialize)]
struct GraphErrorResponse {
    error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    code: Option<String>,
    message: String,
}

/// Error body returned by the identity platform token endpoint.
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    error_description: Option<String>,
}
