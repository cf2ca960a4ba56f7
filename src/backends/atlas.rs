use async_trait::async_trait;

use super::{Payload, RemoteClient, read_http_payload};
use crate::config::BackendConfig;
use crate::error::{ConfigError, StateFetchError};

const ATLAS_DEFAULT_ADDRESS: &str = "https://atlas.hashicorp.com";
const ATLAS_TOKEN_ENV: &str = "ATLAS_TOKEN";

/// Reads state stored in Atlas / Terraform Enterprise under `<account>/<name>`.
#[derive(Clone)]
pub struct AtlasClient {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
    account: String,
    name: String,
}

impl AtlasClient {
    pub fn new(name: &str, access_token: String) -> Result<Self, ConfigError> {
        Self::with_base_url(name, access_token, ATLAS_DEFAULT_ADDRESS.to_string())
    }

    /// NOTE: Primarily used for testing with mock servers.
    pub fn with_base_url(
        name: &str,
        access_token: String,
        base_url: String,
    ) -> Result<Self, ConfigError> {
        let (account, name) = split_name(name)?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ConfigError::InvalidOption {
                key: "address".to_string(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            access_token,
            base_url: base_url.trim_end_matches('/').to_string(),
            account,
            name,
        })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, ConfigError> {
        let name = config.require("atlas", "name")?;

        // NOTE: Flag wins over the environment
        let access_token = match config.get("access_token").filter(|t| !t.is_empty()) {
            Some(token) => token.to_string(),
            None => std::env::var(ATLAS_TOKEN_ENV)
                .ok()
                .filter(|t| !t.is_empty())
                .ok_or(ConfigError::MissingToken {
                    env: ATLAS_TOKEN_ENV,
                })?,
        };

        let base_url = config
            .get("address")
            .filter(|a| !a.is_empty())
            .unwrap_or(ATLAS_DEFAULT_ADDRESS);
        reqwest::Url::parse(base_url).map_err(|e| ConfigError::InvalidOption {
            key: "address".to_string(),
            message: format!("failed to parse address URL: {}", e),
        })?;

        Self::with_base_url(name, access_token, base_url.to_string())
    }

    pub fn state_url(&self) -> String {
        format!(
            "{}/api/v1/terraform/state/{}/{}",
            self.base_url, self.account, self.name
        )
    }
}

fn split_name(raw: &str) -> Result<(String, String), ConfigError> {
    match raw.split('/').collect::<Vec<_>>().as_slice() {
        [account, name] if !account.is_empty() && !name.is_empty() => {
            Ok((account.to_string(), name.to_string()))
        }
        _ => Err(ConfigError::InvalidOption {
            key: "name".to_string(),
            message: format!(
                "malformed name '{}', expected format '<account>/<name>'",
                raw
            ),
        }),
    }
}

#[async_trait]
impl RemoteClient for AtlasClient {
    fn name(&self) -> &str {
        "atlas"
    }

    async fn get(&self) -> Result<Option<Payload>, StateFetchError> {
        let url = format!(
            "{}?access_token={}",
            self.state_url(),
            urlencoding::encode(&self.access_token)
        );

        tracing::debug!(
            account = %self.account,
            name = %self.name,
            "fetching remote state from Atlas"
        );

        // SECURITY: the URL carries the token, so it is stripped from errors
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StateFetchError::Network(e.without_url()))?;

        read_http_payload(response).await
    }
}

impl std::fmt::Debug for AtlasClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtlasClient")
            .field("base_url", &self.base_url)
            .field("account", &self.account)
            .field("name", &self.name)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}
