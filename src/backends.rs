pub mod atlas;
pub mod http;
pub mod local;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::config::BackendConfig;
use crate::error::{ConfigError, StateFetchError};

pub use atlas::AtlasClient;
pub use http::HttpClient;
pub use local::LocalClient;

pub const BUILTIN_BACKENDS: &[&str] = &["atlas", "http", "local"];

/// Raw state document as returned by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub data: Vec<u8>,
}

/// Read access to a remote state store.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    fn name(&self) -> &str;

    /// Fetches the current state. `Ok(None)` means no state has been published yet.
    async fn get(&self) -> Result<Option<Payload>, StateFetchError>;
}

pub fn new_client(
    name: &str,
    config: &BackendConfig,
) -> Result<Box<dyn RemoteClient>, ConfigError> {
    match name {
        "atlas" => Ok(Box::new(AtlasClient::from_config(config)?)),
        "http" => Ok(Box::new(HttpClient::from_config(config)?)),
        "local" => Ok(Box::new(LocalClient::from_config(config)?)),
        other => Err(ConfigError::UnknownBackend {
            name: other.to_string(),
            supported: BUILTIN_BACKENDS.join(", "),
        }),
    }
}

/// Status handling shared by every HTTP-based backend.
pub(crate) async fn read_http_payload(
    response: reqwest::Response,
) -> Result<Option<Payload>, StateFetchError> {
    let status = response.status();
    match status {
        StatusCode::OK => {}
        StatusCode::NO_CONTENT | StatusCode::NOT_FOUND => {
            tracing::debug!(status = status.as_u16(), "no remote state published");
            return Ok(None);
        }
        StatusCode::UNAUTHORIZED => return Err(StateFetchError::AuthRequired),
        StatusCode::FORBIDDEN => return Err(StateFetchError::InvalidAuth),
        StatusCode::INTERNAL_SERVER_ERROR => return Err(StateFetchError::ServerError),
        other => return Err(StateFetchError::UnexpectedStatus(other.as_u16())),
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| StateFetchError::Network(e.without_url()))?;

    if body.is_empty() {
        return Ok(None);
    }

    Ok(Some(Payload {
        data: body.to_vec(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(pairs: &[(&str, &str)]) -> BackendConfig {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_new_client_http() {
        let client = new_client("http", &config(&[("address", "http://127.0.0.1:1/")])).unwrap();
        assert_eq!(client.name(), "http");
    }

    #[test]
    fn test_new_client_atlas() {
        let client = new_client(
            "atlas",
            &config(&[("name", "acme/prod"), ("access_token", "abc")]),
        )
        .unwrap();
        assert_eq!(client.name(), "atlas");
    }

    #[test]
    fn test_new_client_local() {
        let client = new_client("local", &config(&[("path", "terraform.tfstate")])).unwrap();
        assert_eq!(client.name(), "local");
    }

    #[test]
    fn test_new_client_unknown() {
        let result = new_client("s3", &BackendConfig::new());
        match result {
            Err(ConfigError::UnknownBackend { name, supported }) => {
                assert_eq!(name, "s3");
                assert_eq!(supported, "atlas, http, local");
            }
            Err(other) => panic!("expected UnknownBackend error, got {other:?}"),
            Ok(_) => panic!("expected UnknownBackend error"),
        }
    }

    #[test]
    fn test_new_client_missing_option_propagates() {
        let result = new_client("http", &BackendConfig::new());
        assert!(matches!(
            result,
            Err(ConfigError::MissingOption { ref key, .. }) if key == "address"
        ));
    }
}
