use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use super::{Payload, RemoteClient};
use crate::config::BackendConfig;
use crate::error::{ConfigError, StateFetchError};

/// Reads state from a file on disk. A missing file means no state yet.
#[derive(Debug, Clone)]
pub struct LocalClient {
    path: PathBuf,
}

impl LocalClient {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, ConfigError> {
        config.require("local", "path").map(|path| Self::new(path))
    }
}

#[async_trait]
impl RemoteClient for LocalClient {
    fn name(&self) -> &str {
        "local"
    }

    async fn get(&self) -> Result<Option<Payload>, StateFetchError> {
        tracing::debug!(path = %self.path.display(), "reading local state");
        match tokio::fs::read(&self.path).await {
            Ok(data) if data.is_empty() => Ok(None),
            Ok(data) => Ok(Some(Payload { data })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
