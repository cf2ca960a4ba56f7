use async_trait::async_trait;
use reqwest::Url;

use super::{Payload, RemoteClient, read_http_payload};
use crate::config::BackendConfig;
use crate::error::{ConfigError, StateFetchError};

/// Reads state with a plain `GET` against an arbitrary HTTP endpoint.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    address: Url,
    username: Option<String>,
    password: Option<String>,
}

impl HttpClient {
    pub fn new(address: Url) -> Result<Self, ConfigError> {
        Self::create_client(address, None, None, false)
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, ConfigError> {
        let raw = config.require("http", "address")?;
        let address = Url::parse(raw).map_err(|e| ConfigError::InvalidOption {
            key: "address".to_string(),
            message: format!("failed to parse address URL: {}", e),
        })?;
        if !matches!(address.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidOption {
                key: "address".to_string(),
                message: format!("address must be http or https, got {}", address.scheme()),
            });
        }

        let skip_cert_verification = config
            .get_bool("skip_cert_verification")?
            .unwrap_or(false);

        Self::create_client(
            address,
            config.get("username").map(str::to_string),
            config.get("password").map(str::to_string),
            skip_cert_verification,
        )
    }

    fn create_client(
        address: Url,
        username: Option<String>,
        password: Option<String>,
        skip_cert_verification: bool,
    ) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(skip_cert_verification)
            .build()
            .map_err(|e| ConfigError::InvalidOption {
                key: "address".to_string(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            address,
            username,
            password,
        })
    }
}

#[async_trait]
impl RemoteClient for HttpClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn get(&self) -> Result<Option<Payload>, StateFetchError> {
        let mut request = self.client.get(self.address.clone());
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_deref());
        }

        tracing::debug!(address = %self.address, "fetching remote state over HTTP");
        let response = request.send().await?;
        read_http_payload(response).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("address", &self.address.as_str())
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
