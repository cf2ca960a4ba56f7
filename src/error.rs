use thiserror::Error;

/// Errors caused by the invocation itself: bad flags, unknown backends, or
/// backend options that cannot be used to build a client.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Flags(#[from] clap::Error),

    #[error("no '=' value in backend config entry: {0}")]
    MalformedPair(String),

    #[error("empty key in backend config entry: {0}")]
    EmptyKey(String),

    #[error("unknown remote state backend '{name}' (supported: {supported})")]
    UnknownBackend { name: String, supported: String },

    #[error("missing '{key}' configuration for the {backend} backend")]
    MissingOption { backend: String, key: String },

    #[error("missing 'access_token' configuration or {env} environment variable")]
    MissingToken { env: &'static str },

    #[error("invalid '{key}' configuration: {message}")]
    InvalidOption { key: String, message: String },
}

/// Errors raised while reading or decoding the remote state.
///
/// SECURITY: messages must NEVER contain backend credentials.
#[derive(Debug, Error)]
pub enum StateFetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("remote state endpoint requires auth")]
    AuthRequired,

    #[error("remote state endpoint rejected the credentials")]
    InvalidAuth,

    #[error("remote state internal server error")]
    ServerError,

    #[error("unexpected HTTP response code {0}")]
    UnexpectedStatus(u16),

    #[error("failed to read local state: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed state document: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unsupported state version {0}")]
    UnsupportedVersion(u32),
}

#[derive(Debug, Error)]
pub enum RemoteEnvError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to fetch remote state: {0}")]
    StateFetch(#[from] StateFetchError),
}
