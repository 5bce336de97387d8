/*
[INPUT]:  HTTP configuration (base URL, timeouts, credentials)
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Url};
use secrecy::SecretString;

use crate::http::{OrderError, RequestSigner, Result};

/// Base URL for the USDT-M futures testnet
pub const TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";

/// Header carrying the API key on every request (`X-MBX-APIKEY`)
pub const API_KEY_HEADER: &str = "x-mbx-apikey";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Sent as `recvWindow` when set (milliseconds)
    pub recv_window: Option<u64>,
    /// Use the exchange clock for `timestamp` instead of the local one
    pub sync_server_time: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: TESTNET_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
            recv_window: Some(5000),
            sync_server_time: true,
        }
    }
}

/// API key pair, immutable for the life of the client
pub struct Credentials {
    pub api_key: String,
    pub api_secret: SecretString,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// HTTP client for the futures REST API
#[derive(Debug)]
pub struct FuturesClient {
    http_client: Client,
    base_url: Url,
    pub(crate) signer: RequestSigner,
    pub(crate) recv_window: Option<u64>,
    pub(crate) sync_server_time: bool,
}

impl FuturesClient {
    /// Create a new client against the testnet with default configuration
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(ClientConfig::default(), credentials)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig, credentials: Credentials) -> Result<Self> {
        if credentials.api_key.trim().is_empty() {
            return Err(OrderError::Config("API key must not be empty".to_string()));
        }

        let mut api_key = HeaderValue::from_str(&credentials.api_key)
            .map_err(|err| OrderError::Config(format!("invalid API key header value: {err}")))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);

        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .default_headers(headers)
            .build()
            .map_err(|err| OrderError::Config(format!("failed to build HTTP client: {err}")))?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|err| OrderError::Config(format!("invalid base URL {}: {err}", config.base_url)))?;

        Ok(Self {
            http_client,
            base_url,
            signer: RequestSigner::new(&credentials.api_secret)?,
            recv_window: config.recv_window,
            sync_server_time: config.sync_server_time,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL for an endpoint path
    pub(crate) fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        self.base_url
            .join(endpoint)
            .map_err(|err| OrderError::Config(format!("invalid endpoint {endpoint}: {err}")))
    }

    /// Build request builder for a fully formed URL
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http_client.request(method, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_targets_testnet() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, TESTNET_BASE_URL);
        assert_eq!(config.recv_window, Some(5000));
        assert!(config.sync_server_time);
    }

    #[test]
    fn test_endpoint_url_joins_path() {
        let client = FuturesClient::new(Credentials::new("key", "secret")).unwrap();
        let url = client.endpoint_url("/fapi/v1/order").unwrap();
        assert_eq!(url.as_str(), "https://testnet.binancefuture.com/fapi/v1/order");
    }

    #[test]
    fn test_rejects_empty_api_key() {
        let err = FuturesClient::new(Credentials::new("  ", "secret")).unwrap_err();
        assert!(matches!(err, OrderError::Config(_)));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..ClientConfig::default()
        };
        let err = FuturesClient::with_config(config, Credentials::new("key", "secret")).unwrap_err();
        assert!(matches!(err, OrderError::Config(_)));
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let rendered = format!("{:?}", Credentials::new("key", "top-secret"));
        assert!(rendered.contains("key"));
        assert!(!rendered.contains("top-secret"));
    }
}
