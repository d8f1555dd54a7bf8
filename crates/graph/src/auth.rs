//! App-only token acquisition (OAuth 2.0 client-credential flow).

use crate::config::{ClientConfig, Credentials};
use crate::error::{GraphError, GraphResult};
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

/// Tokens this close to expiry are refreshed before use.
const EXPIRY_SKEW_SECS: i64 = 60;

/// A bearer token and the instant it stops being valid.
#[derive(Clone)]
pub struct AccessToken {
    secret: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(secret: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            secret: secret.into(),
            expires_at,
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the token can still be sent at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_SKEW_SECS) < self.expires_at
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: ExpiresIn,
}

/// `expires_in` arrives as a number from the v2 endpoint and as a string from some proxies.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExpiresIn {
    Seconds(i64),
    Text(String),
}

impl ExpiresIn {
    fn seconds(&self) -> GraphResult<i64> {
        match self {
            Self::Seconds(secs) => Ok(*secs),
            Self::Text(text) => text.parse().map_err(|_| {
                GraphError::Authentication(format!("invalid expires_in value: {}", text))
            }),
        }
    }
}

/// Acquires and caches app-only access tokens for one set of credentials.
pub struct TokenProvider {
    http: Client,
    token_url: Url,
    scope: String,
    credentials: Credentials,
    cached: Mutex<Option<AccessToken>>,
}

impl TokenProvider {
    pub fn new(http: Client, config: &ClientConfig) -> GraphResult<Self> {
        Ok(Self {
            http,
            token_url: config.token_url()?,
            scope: config.scope.clone(),
            credentials: config.credentials.clone(),
            cached: Mutex::new(None),
        })
    }

    /// Return a valid bearer token, requesting a new one when the cached token is stale.
    pub async fn token(&self) -> GraphResult<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.secret().to_string());
            }
            debug!(expires_at = %token.expires_at(), "Access token expiring, refreshing");
        }

        let token = self.acquire().await?;
        let secret = token.secret().to_string();
        *cached = Some(token);
        Ok(secret)
    }

    async fn acquire(&self) -> GraphResult<AccessToken> {
        debug!(
            tenant_id = %self.credentials.tenant_id,
            client_id = %self.credentials.client_id,
            "Requesting access token"
        );

        let form = [
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("scope", self.scope.as_str()),
            ("grant_type", "client_credentials"),
        ];

        let response = self
            .http
            .post(self.token_url.clone())
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GraphError::from_token_response(status.as_u16(), &body));
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        let expires_in = token.expires_in.seconds()?;
        let expires_at = Duration::try_seconds(expires_in)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                GraphError::Authentication(format!("invalid expires_in value: {}", expires_in))
            })?;

        Ok(AccessToken::new(token.access_token, expires_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(authority: &str) -> ClientConfig {
        let mut config = ClientConfig::new(Credentials {
            tenant_id: "tenant-1".to_string(),
            client_id: "client-1".to_string(),
            client_secret: "secret-1".to_string(),
        });
        config.authority_host = crate::config::with_trailing_slash(Url::parse(authority).unwrap());
        config
    }

    #[test]
    fn test_token_freshness() {
        let now = Utc::now();

        assert!(AccessToken::new("t", now + Duration::seconds(3600)).is_fresh(now));
        assert!(!AccessToken::new("t", now + Duration::seconds(30)).is_fresh(now));
        assert!(!AccessToken::new("t", now - Duration::seconds(1)).is_fresh(now));
    }

    #[test]
    fn test_expires_in_accepts_number_and_text() {
        let numeric: TokenResponse =
            serde_json::from_str(r#"{"access_token":"a","expires_in":3599}"#).unwrap();
        assert_eq!(numeric.expires_in.seconds().unwrap(), 3599);

        let text: TokenResponse =
            serde_json::from_str(r#"{"access_token":"a","expires_in":"3599"}"#).unwrap();
        assert_eq!(text.expires_in.seconds().unwrap(), 3599);
    }

    #[tokio::test]
    async fn test_token_is_acquired_once_and_cached() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/tenant-1/oauth2/v2.0/token"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("client_id=client-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token_type": "Bearer",
                "expires_in": 3599,
                "access_token": "token-abc"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = TokenProvider::new(Client::new(), &config(&server.uri())).unwrap();

        assert_eq!(provider.token().await.unwrap(), "token-abc");
        assert_eq!(provider.token().await.unwrap(), "token-abc");
    }

    #[tokio::test]
    async fn test_short_lived_token_is_refreshed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/tenant-1/oauth2/v2.0/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token_type": "Bearer",
                "expires_in": 10,
                "access_token": "short-lived"
            })))
            .expect(2)
            .mount(&server)
            .await;

        let provider = TokenProvider::new(Client::new(), &config(&server.uri())).unwrap();

        provider.token().await.unwrap();
        provider.token().await.unwrap();
    }

    #[tokio::test]
    async fn test_out_of_range_lifetime_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/tenant-1/oauth2/v2.0/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token_type": "Bearer",
                "expires_in": 1_000_000_000_000_000_i64,
                "access_token": "token-abc"
            })))
            .mount(&server)
            .await;

        let provider = TokenProvider::new(Client::new(), &config(&server.uri())).unwrap();

        match provider.token().await {
            Err(GraphError::Authentication(message)) => {
                assert_eq!(message, "invalid expires_in value: 1000000000000000");
            }
            other => panic!("Expected authentication error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/tenant-1/oauth2/v2.0/token"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": "invalid_client",
                "error_description": "AADSTS7000215: Invalid client secret provided."
            })))
            .mount(&server)
            .await;

        let provider = TokenProvider::new(Client::new(), &config(&server.uri())).unwrap();

        match provider.token().await {
            Err(GraphError::Authentication(message)) => {
                assert!(message.contains("AADSTS7000215"));
            }
            other => panic!("Expected authentication error, got {:?}", other),
        }
    }
}
