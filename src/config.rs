use crate::error::ConfigError;

pub const DEFAULT_BACKEND: &str = "atlas";

/// Option keys whose values are never printed.
const SENSITIVE_KEYS: &[&str] = &[
    "access_token",
    "password",
    "token",
    "secret_key",
    "access_key",
];

/// Configuration for a single invocation, built once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramConfig {
    pub backend: String,
    pub backend_config: BackendConfig,
    pub prefix: Option<String>,
}

impl ProgramConfig {
    pub fn new(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            backend_config: BackendConfig::new(),
            prefix: None,
        }
    }

    /// An empty prefix is treated the same as no prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    pub fn with_backend_config(mut self, backend_config: BackendConfig) -> Self {
        self.backend_config = backend_config;
        self
    }
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND)
    }
}

/// Backend connection options, kept in insertion order.
///
/// Setting a key that already exists replaces its value in place.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BackendConfig {
    entries: Vec<(String, String)>,
}

impl BackendConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the value for `key`, or a [`ConfigError::MissingOption`] naming
    /// the backend that needed it.
    pub fn require(&self, backend: &str, key: &str) -> Result<&str, ConfigError> {
        self.get(key)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingOption {
                backend: backend.to_string(),
                key: key.to_string(),
            })
    }

    /// Parses a boolean option using the same spellings Go's `strconv.ParseBool` accepts.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };
        match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(Some(true)),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(Some(false)),
            other => Err(ConfigError::InvalidOption {
                key: key.to_string(),
                message: format!("'{}' is not a boolean", other),
            }),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for BackendConfig {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for BackendConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut config = Self::new();
        config.extend(iter);
        config
    }
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in self.iter() {
            if SENSITIVE_KEYS.contains(&key) {
                map.entry(&key, &"[REDACTED]");
            } else {
                map.entry(&key, &value);
            }
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_last_write_wins() {
        let mut config = BackendConfig::new();
        config.set("key", "first");
        config.set("key", "second");
        assert_eq!(config.len(), 1);
        assert_eq!(config.get("key"), Some("second"));
    }

    #[test]
    fn test_insertion_order_preserved_on_overwrite() {
        let config: BackendConfig = [("bucket", "b"), ("key", "k"), ("bucket", "b2")]
            .into_iter()
            .collect();
        let keys: Vec<&str> = config.keys().collect();
        assert_eq!(keys, vec!["bucket", "key"]);
        assert_eq!(config.get("bucket"), Some("b2"));
    }

    #[test]
    fn test_require_missing_and_empty() {
        let mut config = BackendConfig::new();
        config.set("address", "");

        let err = config.require("http", "address").unwrap_err();
        assert!(matches!(err, ConfigError::MissingOption { .. }));

        let err = config.require("http", "name").unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing 'name' configuration for the http backend"
        );
    }

    #[test]
    fn test_get_bool_go_spellings() {
        let mut config = BackendConfig::new();
        for (raw, expected) in [("1", true), ("True", true), ("F", false), ("false", false)] {
            config.set("skip", raw);
            assert_eq!(config.get_bool("skip").unwrap(), Some(expected), "{raw}");
        }
        assert_eq!(config.get_bool("absent").unwrap(), None);
    }

    #[test]
    fn test_get_bool_rejects_garbage() {
        let mut config = BackendConfig::new();
        config.set("skip_cert_verification", "yes");
        let err = config.get_bool("skip_cert_verification").unwrap_err();
        assert!(err.to_string().contains("'yes' is not a boolean"));
    }

    #[test]
    fn test_debug_does_not_expose_secrets() {
        let mut config = BackendConfig::new();
        config.set("name", "acme/prod");
        config.set("access_token", "super_secret_token_12345");
        config.set("password", "hunter2");

        let debug_output = format!("{:?}", config);
        assert!(debug_output.contains("acme/prod"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token_12345"));
        assert!(!debug_output.contains("hunter2"));
    }

    #[test]
    fn test_empty_prefix_is_no_prefix() {
        let config = ProgramConfig::default().with_prefix("");
        assert_eq!(config.prefix, None);

        let config = ProgramConfig::default().with_prefix("foobar");
        assert_eq!(config.prefix.as_deref(), Some("foobar"));
    }

    #[test]
    fn test_default_backend_is_atlas() {
        assert_eq!(ProgramConfig::default().backend, "atlas");
    }
}
