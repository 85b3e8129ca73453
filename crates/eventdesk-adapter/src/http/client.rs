/*
[INPUT]:  HTTP configuration (base URL, timeouts) and session cookies
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::envelope::Envelope;
use super::error::{ApiError, Result};

/// Default backend origin
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Main HTTP client for the eventdesk REST API.
///
/// Sessions are cookie based; the cookie jar is shared by every request made
/// through this client.
#[derive(Debug, Clone)]
pub struct EventdeskClient {
    http_client: Client,
    base_url: Url,
    cookies: Arc<Jar>,
}

impl EventdeskClient {
    /// Create a new client against the default base URL
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default(), DEFAULT_BASE_URL)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig, base_url: &str) -> Result<Self> {
        let cookies = Arc::new(Jar::default());
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .cookie_provider(cookies.clone())
            .build()?;

        Ok(Self {
            http_client,
            base_url: normalize_base_url(base_url)?,
            cookies,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Current session cookies as a `Cookie` header value, if any.
    pub fn cookie_header(&self) -> Option<String> {
        self.cookies
            .cookies(&self.base_url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    /// Load cookies previously exported with [`Self::cookie_header`].
    pub fn restore_cookies(&self, header: &str) {
        for pair in header.split(';').map(str::trim).filter(|pair| !pair.is_empty()) {
            self.cookies.add_cookie_str(pair, &self.base_url);
        }
    }

    /// Build full URL for an endpoint relative to the base URL
    fn url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.url(endpoint)?;
        Ok(self.http_client.request(method, url))
    }

    /// Send a request and check the envelope `code` before `data` is typed.
    async fn send_raw(&self, builder: RequestBuilder) -> Result<Option<serde_json::Value>> {
        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().clone();
        let body = response.text().await?;
        debug!(%url, status = status.as_u16(), bytes = body.len(), "response received");

        if !status.is_success() {
            let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.msg)
                .unwrap_or(body);
            return Err(ApiError::from_status(status, message));
        }

        let envelope: Envelope<serde_json::Value> = serde_json::from_str(&body)?;
        envelope.check()
    }

    /// Send a request and unwrap the envelope's `data`.
    pub(crate) async fn send_envelope<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T> {
        let data = self.send_raw(builder).await?.ok_or_else(|| {
            ApiError::InvalidResponse("successful response is missing data".to_string())
        })?;
        Ok(serde_json::from_value(data)?)
    }

    /// Send a request whose envelope `data` is irrelevant.
    pub(crate) async fn send_ack(&self, builder: RequestBuilder) -> Result<()> {
        self.send_raw(builder).await.map(|_| ())
    }
}

fn normalize_base_url(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Config("base URL must not be empty".to_string()));
    }
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Ok(Url::parse(&with_slash)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join_keeps_base_path() {
        let client =
            EventdeskClient::with_config(ClientConfig::default(), "https://admin.example.com/v2")
                .expect("client");
        let url = client.url("/api/tasks/3").expect("url");
        assert_eq!(url.as_str(), "https://admin.example.com/v2/api/tasks/3");
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let err = EventdeskClient::with_config(ClientConfig::default(), "  ").unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_cookie_roundtrip() {
        let client = EventdeskClient::new().expect("client");
        assert_eq!(client.cookie_header(), None);

        client.restore_cookies("SESSION=abc123; remember=1");
        let header = client.cookie_header().expect("cookies");
        assert!(header.contains("SESSION=abc123"));
        assert!(header.contains("remember=1"));

        let other = EventdeskClient::new().expect("client");
        other.restore_cookies(&header);
        let restored = other.cookie_header().expect("restored cookies");
        assert!(restored.contains("SESSION=abc123"));
        assert!(restored.contains("remember=1"));
    }
}
